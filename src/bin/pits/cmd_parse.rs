use anyhow::Result;

use pits::parse_point_in_time;

pub fn exec(spec: Option<String>) -> Result<()> {
    let pit = parse_point_in_time(spec.as_deref())?;
    println!("{}", pit);
    Ok(())
}
