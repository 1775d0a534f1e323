use actix_web::HttpResponse;

use crate::{
    error::{ApiError, Error},
    report::ReportData,
};

/// Render a report as CSV text: title and metadata rows, then headers, then
/// the data rows. Quoting (commas, embedded quotes) is handled by the writer.
pub fn report_to_csv(report: &ReportData) -> Result<String, Error> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);

    wtr.write_record([report.title.as_str()])?;
    if let Some(subtitle) = &report.subtitle {
        wtr.write_record([subtitle.as_str()])?;
    }
    wtr.write_record([format!(
        "Generated: {}",
        report.generated.format("%Y-%m-%d %H:%M:%S UTC")
    )])?;

    wtr.write_record(&report.headers)?;
    for row in &report.rows {
        wtr.write_record(row)?;
    }

    let csv_data = wtr
        .into_inner()
        .map_err(|e| Error::ServerError(format!("CSV writer error: {}", e)))?;

    Ok(String::from_utf8(csv_data)?)
}

/// Generate a CSV attachment response for a report.
pub fn to_csv_response(
    report: &ReportData,
    filename: &str,
) -> Result<HttpResponse, ApiError> {
    let csv_string = report_to_csv(report).map_err(ApiError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn report(rows: Vec<Vec<String>>) -> ReportData {
        ReportData {
            title: String::from("Expense Report"),
            subtitle: Some(String::from("From 2024-01-01 to 2024-02-01")),
            headers: vec![String::from("Category"), String::from("Amount")],
            rows,
            generated: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let csv = report_to_csv(&report(vec![vec![
            String::from("Repairs, exterior"),
            String::from("$120.00"),
        ]]))
        .unwrap();

        assert!(csv.contains("\"Repairs, exterior\",$120.00"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = report_to_csv(&report(vec![vec![
            String::from("the \"big\" unit"),
            String::from("$1.00"),
        ]]))
        .unwrap();

        assert!(csv.contains("\"the \"\"big\"\" unit\",$1.00"));
    }

    #[test]
    fn test_metadata_rows_precede_headers() {
        let csv = report_to_csv(&report(vec![])).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Expense Report");
        assert_eq!(lines[1], "From 2024-01-01 to 2024-02-01");
        assert!(lines[2].starts_with("Generated: "));
        assert_eq!(lines[3], "Category,Amount");
    }
}
