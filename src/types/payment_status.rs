use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Serialize};

/// Settlement state of a recorded rent payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "PARTIALLY_PAID")]
    PartiallyPaid,
    #[serde(rename = "NOT_PAID")]
    NotPaid,
    #[serde(rename = "OVERPAID")]
    Overpaid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::PartiallyPaid => write!(f, "PARTIALLY_PAID"),
            PaymentStatus::NotPaid => write!(f, "NOT_PAID"),
            PaymentStatus::Overpaid => write!(f, "OVERPAID"),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.to_string()
    }
}

impl FromStr for PaymentStatus {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<PaymentStatus, Self::Err> {
        match value {
            "PAID" => Ok(PaymentStatus::Paid),
            "PARTIALLY_PAID" => Ok(PaymentStatus::PartiallyPaid),
            "NOT_PAID" => Ok(PaymentStatus::NotPaid),
            "OVERPAID" => Ok(PaymentStatus::Overpaid),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Payment status not supported",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for status in [
            PaymentStatus::Paid,
            PaymentStatus::PartiallyPaid,
            PaymentStatus::NotPaid,
            PaymentStatus::Overpaid,
        ] {
            let parsed = PaymentStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(PaymentStatus::from_str("LATE").is_err());
    }
}
