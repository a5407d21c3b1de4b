//! Source row bindings: how each parsed row reaches the writer.

use async_trait::async_trait;
use covid_core::{CovidResult, CovidStatsRow, CovidWriter, VaccinationRow, VaccineMetadataRow};
use csv::StringRecord;

use super::SourceRow;

#[async_trait]
impl SourceRow for VaccineMetadataRow {
    fn parse(record: &StringRecord) -> CovidResult<Option<Self>> {
        VaccineMetadataRow::from_record(record)
    }

    async fn write(&self, writer: &dyn CovidWriter) -> CovidResult<()> {
        writer.upsert_vaccine_metadata(self).await
    }
}

#[async_trait]
impl SourceRow for VaccinationRow {
    fn parse(record: &StringRecord) -> CovidResult<Option<Self>> {
        VaccinationRow::from_record(record).map(Some)
    }

    async fn write(&self, writer: &dyn CovidWriter) -> CovidResult<()> {
        writer.upsert_vaccination(self).await
    }
}

#[async_trait]
impl SourceRow for CovidStatsRow {
    fn parse(record: &StringRecord) -> CovidResult<Option<Self>> {
        CovidStatsRow::from_record(record).map(Some)
    }

    async fn write(&self, writer: &dyn CovidWriter) -> CovidResult<()> {
        writer.upsert_covid_stats(self).await
    }
}
