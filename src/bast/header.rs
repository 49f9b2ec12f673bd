//! Header data for the BAST document.
//!
//! Collects the five header values from the form boundary and combines the
//! date and time inputs into a single timestamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Header fields entered in the BAST form, immutable once submitted.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Combined date + time of the handover.
    pub tanggal: NaiveDateTime,
    pub warehouse: String,
    pub courier: String,
    pub driver: String,
    pub police: String,
}

impl HeaderInfo {
    /// Build the header from the raw form values. The timestamp takes its
    /// year/month/day from `tanggal` and hour/minute/second from `waktu`,
    /// with no timezone handling.
    pub fn new(
        tanggal: NaiveDate,
        waktu: NaiveTime,
        warehouse: String,
        courier: String,
        driver: String,
        police: String,
    ) -> Self {
        Self {
            tanggal: tanggal.and_time(waktu),
            warehouse,
            courier,
            driver,
            police,
        }
    }

    /// Labels of the required text fields that are still empty. A non-empty
    /// result blocks the upload step.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("Warehouse", &self.warehouse),
            ("Courier Name", &self.courier),
            ("Driver Name", &self.driver),
            ("Police Number", &self.police),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    /// Timestamp as printed in the document header.
    pub fn tanggal_display(&self) -> String {
        self.tanggal.format("%d/%m/%Y %H:%M:%S").to_string()
    }

    /// Download filename: `BAST_<warehouse>_<courier>_<police>_<YYYYMMDD_HHMMSS>.pdf`.
    pub fn filename(&self) -> String {
        format!(
            "BAST_{}_{}_{}_{}.pdf",
            self.warehouse,
            self.courier,
            self.police,
            self.tanggal.format("%Y%m%d_%H%M%S")
        )
    }
}
