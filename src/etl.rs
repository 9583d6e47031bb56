pub mod classify;
pub mod extract_water;

use log::{error, info};

use crate::errors::{Error, Result};

fn log_failure(etl_name: &str, stage: &str, err: &Error) {
    let message = err.to_string();
    error!(
        etl_name = etl_name,
        stage = stage,
        category = err.category(),
        err = message.as_str();
        "Stage failed with error"
    );
}

pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;

    fn is_cached(&self) -> Result<bool>;
    fn clean(&self) -> Result<()>;

    fn extract(&mut self) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    fn load(&mut self, output: Self::Output) -> Result<()>;

    /// Runs all three stages unless the outputs are already in place.
    /// Returns `false` when the cached outputs were kept.
    fn process(&mut self) -> Result<bool> {
        info!(etl_name = self.etl_name(); "Starting ETL process");
        if self.is_cached()? {
            info!(etl_name = self.etl_name(); "Using cached value");
            return Ok(false);
        }

        info!(etl_name = self.etl_name(); "Extracting");
        let input = match self.extract() {
            Ok(input) => input,
            Err(err) => {
                log_failure(self.etl_name(), "extract", &err);
                return Err(err);
            }
        };

        info!(etl_name = self.etl_name(); "Transforming");
        let output = match self.transform(input) {
            Ok(output) => output,
            Err(err) => {
                log_failure(self.etl_name(), "transform", &err);
                return Err(err);
            }
        };

        info!(etl_name = self.etl_name(); "Loading");
        if let Err(err) = self.load(output) {
            log_failure(self.etl_name(), "load", &err);
            return Err(err);
        }

        info!(etl_name = self.etl_name(); "Process finished");
        Ok(true)
    }
}
