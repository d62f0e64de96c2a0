//! Print the effective field configuration

use super::FieldSource;
use anyhow::Result;

pub fn run(source: &FieldSource) -> Result<()> {
    let config = source.resolve()?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
