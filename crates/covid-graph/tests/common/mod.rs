//! Fixture CSVs shared by the ingestion tests.

#![allow(dead_code)]

use std::fs;

use covid_graph::LoadPaths;
use tempfile::TempDir;

pub const METADATA: &str = "\
ISO3;PRODUCT_NAME;VACCINE_NAME;COMPANY_NAME;AUTHORIZATION_DATE;START_DATE;END_DATE
US;Pfizer;Comirnaty;Pfizer BioNTech;11/12/2020;01/01/2021;
US;;;;;;
BR;CoronaVac;CoronaVac;Sinovac;;17/01/2021;
";

pub const VACCINATIONS: &str = "\
COUNTRY;ISO3;WHO_REGION;DATA_SOURCE;DATE_UPDATED;TOTAL_VACCINATIONS;\
PERSONS_VACCINATED_1PLUS_DOSE;TOTAL_VACCINATIONS_PER100;\
PERSONS_VACCINATED_1PLUS_DOSE_PER100;\
PERSONS_LAST_DOSE;PERSONS_LAST_DOSE_PER100;VACCINES_USED;\
FIRST_VACCINE_DATE;NUMBER_VACCINES_TYPES_USED;PERSONS_BOOSTER_ADD_DOSE;PERSONS_BOOSTER_ADD_DOSE_PER100
United States;US;Americas;REPORTING;01/12/2021;800;500;240.5;150.25;400;120;Pfizer;01/01/2021;1;100;30
Brazil;BR;Americas;REPORTING;REPORTING;900;;;;;;CoronaVac;17/01/2021;1;;
";

pub const GLOBAL: &str = "\
Date_reported;Country_code;Country;WHO_region;New_cases;Cumulative_cases;New_deaths;Cumulative_deaths
01/12/2021;US;United States of America;Americas;10;1000;1;50
01/12/2021;BR;Brazil;Americas;5;700;;20
";

pub fn write_sources(dir: &TempDir, metadata: &str, vaccinations: &str, global: &str) -> LoadPaths {
    let write = |name: &str, contents: &str| {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    };

    LoadPaths {
        metadata: write("vaccination-metadata.csv", metadata),
        vaccinations: write("vaccination-data.csv", vaccinations),
        global: write("WHO-COVID-19-global-data.csv", global),
    }
}
