//! Ingestion row records.
//!
//! Each source CSV has a fixed, position-dependent column layout. A row
//! parses into one record bundling the nodes it upserts.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::error::{CovidError, CovidResult};
use crate::field::{parse_date, parse_float, parse_int, parse_reporting_date};
use crate::model::{Country, CovidStats, VaccinationStats, Vaccine};

fn column<'r>(record: &'r StringRecord, index: usize, field: &'static str) -> CovidResult<&'r str> {
    record
        .get(index)
        .ok_or(CovidError::MissingColumn { index, field })
}

fn key(record: &StringRecord, index: usize, field: &'static str) -> CovidResult<String> {
    let value = column(record, index, field)?.trim();
    if value.is_empty() {
        return Err(CovidError::Parse {
            field,
            value: String::new(),
            reason: "value is required".to_string(),
        });
    }
    Ok(value.to_string())
}

fn optional_text(record: &StringRecord, index: usize, field: &'static str) -> CovidResult<Option<String>> {
    let value = column(record, index, field)?.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// A row of the vaccination metadata file.
///
/// Columns: 0 country code, 1 product, 2 vaccine name, 3 company,
/// 4 authorization date, 5 start date.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccineMetadataRow {
    pub country_code: String,
    pub vaccine: Vaccine,
    pub authorized_on: Option<NaiveDate>,
    pub started_on: Option<NaiveDate>,
}

impl VaccineMetadataRow {
    /// Parse a row. Rows without a product name yield `Ok(None)`.
    pub fn from_record(record: &StringRecord) -> CovidResult<Option<Self>> {
        let product = column(record, 1, "product")?.trim();
        if product.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            country_code: key(record, 0, "countryCode")?,
            vaccine: Vaccine {
                product: product.to_string(),
                vaccine: column(record, 2, "vaccine")?.trim().to_string(),
                company: column(record, 3, "company")?.trim().to_string(),
            },
            authorized_on: parse_date("authorizationDate", column(record, 4, "authorizationDate")?)?
                .into_option(),
            started_on: parse_date("startDate", column(record, 5, "startDate")?)?.into_option(),
        }))
    }
}

/// A row of the vaccination statistics file.
///
/// Columns: 0 country name, 1 country code, 2 region, 4 reporting date,
/// 5-10 totals/first-dose/last-dose figures, 14-15 booster figures.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationRow {
    pub country: Country,
    pub region: String,
    pub reported_on: Option<NaiveDate>,
    pub stats: VaccinationStats,
}

impl VaccinationRow {
    pub fn from_record(record: &StringRecord) -> CovidResult<Self> {
        let float = |index: usize, field: &'static str| -> CovidResult<Option<f64>> {
            Ok(parse_float(field, column(record, index, field)?)?.into_option())
        };

        Ok(Self {
            country: Country {
                code: key(record, 1, "countryCode")?,
                name: optional_text(record, 0, "countryName")?,
            },
            region: key(record, 2, "region")?,
            reported_on: parse_reporting_date("date", column(record, 4, "date")?)?.into_option(),
            stats: VaccinationStats {
                total_vaccinations: float(5, "totalVaccinations")?,
                persons_vaccinated_1plus_dose: float(6, "personsVaccinated1PlusDose")?,
                total_vaccinations_per100: float(7, "totalVaccinationsPer100")?,
                persons_vaccinated_1plus_dose_per100: float(8, "personsVaccinated1PlusDosePer100")?,
                persons_last_dose: float(9, "personsLastDose")?,
                persons_last_dose_per100: float(10, "personsLastDosePer100")?,
                persons_booster_add_dose: float(14, "personsBoosterAddDose")?,
                persons_booster_add_dose_per100: float(15, "personsBoosterAddDosePer100")?,
            },
        })
    }
}

/// A row of the global case/death file.
///
/// Columns: 0 date, 1 country code, 2 country name, 3 region, 4 new cases,
/// 5 cumulative cases, 6 new deaths, 7 cumulative deaths.
#[derive(Debug, Clone, PartialEq)]
pub struct CovidStatsRow {
    pub country: Country,
    pub region: String,
    pub stats: CovidStats,
}

impl CovidStatsRow {
    pub fn from_record(record: &StringRecord) -> CovidResult<Self> {
        let date = parse_date("date", column(record, 0, "date")?)?.required("date")?;
        let country_code = key(record, 1, "countryCode")?;

        let stats = CovidStats {
            date,
            country_code: country_code.clone(),
            new_cases: parse_int("newCases", column(record, 4, "newCases")?)?.into_option(),
            cumulative_cases: parse_int("cumulativeCases", column(record, 5, "cumulativeCases")?)?
                .required("cumulativeCases")?,
            new_deaths: parse_int("newDeaths", column(record, 6, "newDeaths")?)?.into_option(),
            cumulative_deaths: parse_int("cumulativeDeaths", column(record, 7, "cumulativeDeaths")?)?
                .required("cumulativeDeaths")?,
        };

        Ok(Self {
            country: Country {
                code: country_code,
                name: optional_text(record, 2, "countryName")?,
            },
            region: key(record, 3, "region")?,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn test_metadata_row() {
        let row = VaccineMetadataRow::from_record(&record(&[
            "USA", "Comirnaty", "Pfizer BioNTech - Comirnaty", "Pfizer BioNTech", "11/12/2020", "14/12/2020",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(row.country_code, "USA");
        assert_eq!(row.vaccine.product, "Comirnaty");
        assert_eq!(row.vaccine.company, "Pfizer BioNTech");
        assert_eq!(row.authorized_on.unwrap().to_string(), "2020-12-11");
        assert_eq!(row.started_on.unwrap().to_string(), "2020-12-14");
    }

    #[test]
    fn test_metadata_row_without_product_is_skipped() {
        let row = VaccineMetadataRow::from_record(&record(&["USA", "", "", "", "", ""])).unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_metadata_row_dates_are_optional() {
        let row = VaccineMetadataRow::from_record(&record(&["BRA", "CoronaVac", "Sinovac", "Sinovac", "", ""]))
            .unwrap()
            .unwrap();
        assert!(row.authorized_on.is_none());
        assert!(row.started_on.is_none());
    }

    #[test]
    fn test_metadata_row_bad_date_fails() {
        let cells = ["BRA", "CoronaVac", "Sinovac", "Sinovac", "2021-01-17", ""];
        let err = VaccineMetadataRow::from_record(&record(&cells)).unwrap_err();
        assert!(err.to_string().contains("authorizationDate"));
    }

    fn vaccination_cells(date: &str) -> Vec<String> {
        vec![
            "Brazil", "BRA", "AMRO", "REPORTING", date, "500", "400", "2.5", "1.9", "300", "1.4", "X",
            "01/01/2021", "3", "", "0.5",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    #[test]
    fn test_vaccination_row() {
        let row = VaccinationRow::from_record(&StringRecord::from(vaccination_cells("03/03/2022"))).unwrap();
        assert_eq!(row.country.code, "BRA");
        assert_eq!(row.country.name.as_deref(), Some("Brazil"));
        assert_eq!(row.region, "AMRO");
        assert_eq!(row.reported_on.unwrap().to_string(), "2022-03-03");
        assert_eq!(row.stats.total_vaccinations, Some(500.0));
        assert_eq!(row.stats.persons_vaccinated_1plus_dose, Some(400.0));
        assert_eq!(row.stats.persons_last_dose_per100, Some(1.4));
        assert_eq!(row.stats.persons_booster_add_dose, None);
        assert_eq!(row.stats.persons_booster_add_dose_per100, Some(0.5));
    }

    #[test]
    fn test_vaccination_row_with_sentinel_date() {
        let row = VaccinationRow::from_record(&StringRecord::from(vaccination_cells("REPORTING"))).unwrap();
        assert!(row.reported_on.is_none());
    }

    #[test]
    fn test_vaccination_row_short_record() {
        let mut cells = vaccination_cells("03/03/2022");
        cells.truncate(10);
        let err = VaccinationRow::from_record(&StringRecord::from(cells)).unwrap_err();
        assert!(matches!(err, CovidError::MissingColumn { index: 10, .. }));
    }

    #[test]
    fn test_covid_stats_row() {
        let row = CovidStatsRow::from_record(&record(&[
            "01/12/2021", "US", "United States of America", "AMRO", "", "1000", "3", "50",
        ]))
        .unwrap();
        assert_eq!(row.stats.date.to_string(), "2021-12-01");
        assert_eq!(row.stats.country_code, "US");
        assert_eq!(row.stats.new_cases, None);
        assert_eq!(row.stats.cumulative_cases, 1000);
        assert_eq!(row.stats.new_deaths, Some(3));
        assert_eq!(row.stats.cumulative_deaths, 50);
        assert_eq!(row.region, "AMRO");
    }

    #[test]
    fn test_covid_stats_row_requires_keys_and_totals() {
        let parse = |cells: [&str; 8]| CovidStatsRow::from_record(&record(&cells));

        // date, country code, region, cumulative cases, cumulative deaths
        assert!(parse(["", "US", "USA", "AMRO", "1", "2", "3", "4"]).is_err());
        assert!(parse(["01/12/2021", "", "USA", "AMRO", "1", "2", "3", "4"]).is_err());
        assert!(parse(["01/12/2021", "US", "USA", "", "1", "2", "3", "4"]).is_err());
        assert!(parse(["01/12/2021", "US", "USA", "AMRO", "1", "", "3", "4"]).is_err());
        assert!(parse(["01/12/2021", "US", "USA", "AMRO", "1", "2", "3", ""]).is_err());
        assert!(parse(["01/12/2021", "US", "USA", "AMRO", "1", "x", "3", "4"]).is_err());
    }

    #[test]
    fn test_covid_stats_row_daily_counts_are_optional() {
        let row = CovidStatsRow::from_record(&record(&["01/12/2021", "US", "", "AMRO", "", "2", "", "4"])).unwrap();
        assert_eq!(row.stats.new_cases, None);
        assert_eq!(row.stats.new_deaths, None);
        assert_eq!(row.country.name, None);
    }
}
