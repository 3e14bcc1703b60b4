//! CSV-based insurance tier table loader
//!
//! Expected layout (header plus one row per health level, `base` optional):
//!
//! ```text
//! health_level,500,1500,2500,3500,4000,4500
//! base,20,30,35,40,45,50
//! ohboy,20,30,35,40,45,50
//! ...
//! ```

use super::table::{InsuranceTierTable, TierRow, TIER_COUNT};
use crate::error::TierTableError;
use crate::selection::{AmountTier, HealthLevel, InsuranceTier};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the tier table
pub const DEFAULT_TIERS_PATH: &str = "data/tiers/insurance_tiers.csv";

/// Name of the first header column
const ROW_COLUMN: &str = "health_level";

/// Load and validate a tier table from a CSV file
pub fn load_insurance_tiers<P: AsRef<Path>>(path: P) -> Result<InsuranceTierTable, TierTableError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = load_insurance_tiers_from_reader(file)?;
    info!("Loaded insurance tier table from {}", path.display());
    Ok(table)
}

/// Load the tier table from the default location
pub fn load_default_tiers() -> Result<InsuranceTierTable, TierTableError> {
    load_insurance_tiers(DEFAULT_TIERS_PATH)
}

/// Load and validate a tier table from any reader
pub fn load_insurance_tiers_from_reader<R: Read>(reader: R) -> Result<InsuranceTierTable, TierTableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    check_header(csv_reader.headers()?)?;

    let mut base: Option<TierRow> = None;
    let mut levels: [Option<TierRow>; 5] = [None; 5];

    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().to_string();
        let row = parse_row(&name, record.iter().skip(1))?;

        if name.eq_ignore_ascii_case("base") {
            base = Some(row);
        } else {
            let level: HealthLevel = name
                .parse()
                .map_err(|_| TierTableError::UnknownRow(name.clone()))?;
            levels[level.index()] = Some(row);
        }
        debug!("Tier row {}: {:?}", name, row);
    }

    let mut rows = [[0.0; TIER_COUNT]; 5];
    for level in HealthLevel::ALL {
        rows[level.index()] = levels[level.index()].ok_or(TierTableError::MissingRow(level.as_str()))?;
    }

    // Without an explicit base row, no health level pays the weakest rate
    let base = base.unwrap_or(rows[HealthLevel::Ohboy.index()]);

    InsuranceTierTable::from_rows(base, rows)
}

/// Header must name the row column and list the tier amounts in ascending order,
/// since row values are read by position
fn check_header(header: &csv::StringRecord) -> Result<(), TierTableError> {
    if header.len() != TIER_COUNT + 1 {
        return Err(TierTableError::WrongWidth {
            row: "header".to_string(),
            found: header.len().saturating_sub(1),
            expected: TIER_COUNT,
        });
    }

    if !header[0].eq_ignore_ascii_case(ROW_COLUMN) {
        return Err(TierTableError::UnexpectedHeader {
            column: 0,
            expected: ROW_COLUMN.to_string(),
            found: header[0].to_string(),
        });
    }

    for (i, (found, tier)) in header.iter().skip(1).zip(InsuranceTier::ALL).enumerate() {
        if found.parse::<u32>().ok() != Some(tier.amount()) {
            return Err(TierTableError::UnexpectedHeader {
                column: i + 1,
                expected: tier.amount().to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

fn parse_row<'a, I>(name: &str, values: I) -> Result<TierRow, TierTableError>
where
    I: Iterator<Item = &'a str>,
{
    let values: Vec<&str> = values.collect();
    if values.len() != TIER_COUNT {
        return Err(TierTableError::WrongWidth {
            row: name.to_string(),
            found: values.len(),
            expected: TIER_COUNT,
        });
    }

    let mut row = [0.0; TIER_COUNT];
    for (slot, raw) in row.iter_mut().zip(values) {
        *slot = raw.parse().map_err(|_| TierTableError::InvalidValue {
            row: name.to_string(),
            value: raw.to_string(),
        })?;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "health_level,500,1500,2500,3500,4000,4500\n";

    #[test]
    fn test_load_default_tiers() {
        let result = load_default_tiers();
        assert!(result.is_ok(), "Failed to load tier table: {:?}", result.err());

        assert_eq!(result.unwrap(), InsuranceTierTable::default_pricing());
    }

    #[test]
    fn test_base_row_defaults_to_ohboy() {
        let csv = format!(
            "{HEADER}\
             ohboy,10,20,30,40,50,60\n\
             unhealthy,10,20,30,40,50,60\n\
             healthier,15,25,35,45,55,65\n\
             active,15,25,35,45,55,65\n\
             athlete,20,30,40,50,60,70\n"
        );

        let table = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.get_rate(InsuranceTier::R2500, None), 30.0);
        assert_eq!(table.get_rate(InsuranceTier::R4500, Some(HealthLevel::Athlete)), 70.0);
    }

    #[test]
    fn test_missing_level_row() {
        let csv = format!(
            "{HEADER}\
             ohboy,20,30,35,40,45,50\n\
             unhealthy,22,32.5,40,45,50,60\n\
             active,27.5,40,50,60,70,90\n\
             athlete,30,45,55,70,90,100\n"
        );

        let err = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TierTableError::MissingRow("healthier")));
    }

    #[test]
    fn test_rejects_bad_values() {
        let unknown = format!("{HEADER}couch,1,2,3,4,5,6\n");
        assert!(matches!(
            load_insurance_tiers_from_reader(unknown.as_bytes()),
            Err(TierTableError::UnknownRow(name)) if name == "couch"
        ));

        let short = format!("{HEADER}ohboy,20,30,35\n");
        assert!(matches!(
            load_insurance_tiers_from_reader(short.as_bytes()),
            Err(TierTableError::WrongWidth { found: 3, .. })
        ));

        let garbled = format!("{HEADER}ohboy,20,thirty,35,40,45,50\n");
        assert!(matches!(
            load_insurance_tiers_from_reader(garbled.as_bytes()),
            Err(TierTableError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_reordered_tier_columns() {
        let csv = "health_level,4500,4000,3500,2500,1500,500\n\
                   ohboy,50,45,40,35,30,20\n\
                   unhealthy,60,50,45,40,32.5,22\n\
                   healthier,70,60,50,45,35,25\n\
                   active,90,70,60,50,40,27.5\n\
                   athlete,100,90,70,55,45,30\n";

        let err = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            TierTableError::UnexpectedHeader { column, expected, found } => {
                assert_eq!(column, 1);
                assert_eq!(expected, "500");
                assert_eq!(found, "4500");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_misnamed_row_column() {
        let csv = "level,500,1500,2500,3500,4000,4500\nohboy,20,30,35,40,45,50\n";

        let err = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TierTableError::UnexpectedHeader { column: 0, .. }));
    }

    #[test]
    fn test_rejects_base_row_above_ohboy() {
        let csv = format!(
            "{HEADER}\
             base,95,95,95,95,95,95\n\
             ohboy,20,30,35,40,45,50\n\
             unhealthy,22,32.5,40,45,50,60\n\
             healthier,25,35,45,50,60,70\n\
             active,27.5,40,50,60,70,90\n\
             athlete,30,45,55,70,90,100\n"
        );

        let err = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TierTableError::BaseMismatch { tier: 500, .. }));
    }

    #[test]
    fn test_rejects_decreasing_health_column() {
        let csv = format!(
            "{HEADER}\
             ohboy,20,30,35,40,45,50\n\
             unhealthy,22,32.5,40,45,50,60\n\
             healthier,25,35,45,50,60,70\n\
             active,27.5,40,50,60,70,90\n\
             athlete,30,45,55,70,90,85\n"
        );

        let err = load_insurance_tiers_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TierTableError::NotMonotonic { tier: 4500, .. }));
    }
}
