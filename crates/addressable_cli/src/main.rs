//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable over `addressable_core` formatters.
//! - Keep output deterministic for quick local sanity checks.

use addressable_core::{
    core_version, format_toll_free_number, format_us_number, great_circle_distance,
    set_location_attribute, Coordinates, DistanceUnit,
};
use std::process::ExitCode;

const USAGE: &str = "usage:
  addressable version
  addressable phone <number>
  addressable toll-free <number>
  addressable point <lat,lon>
  addressable distance <lat1> <lon1> <lat2> <lon2> [M|K|N]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[&str]) -> Result<String, String> {
    match args {
        ["version"] => Ok(format!("addressable_core version={}", core_version())),
        ["phone", number] => Ok(format_us_number(number)),
        ["toll-free", number] => Ok(format_toll_free_number(number)),
        ["point", value] => set_location_attribute(value)
            .map(|stored| stored.into_inner())
            .map_err(|err| err.to_string()),
        ["distance", lat1, lon1, lat2, lon2, rest @ ..] if rest.len() <= 1 => {
            let unit = DistanceUnit::from_code(rest.first().copied().unwrap_or("M"));
            let from = coordinates(lat1, lon1)?;
            let to = coordinates(lat2, lon2)?;
            Ok(format!(
                "{:.3} {}",
                great_circle_distance(from, to, unit),
                unit.code()
            ))
        }
        _ => Err(USAGE.to_string()),
    }
}

fn coordinates(lat: &str, lon: &str) -> Result<Coordinates, String> {
    Coordinates::parse(&format!("{lat},{lon}"))
        .ok_or_else(|| format!("invalid coordinates `{lat},{lon}`"))
}
