//! Print one night's conditions.
//!
//! ```text
//! cargo run --example tonight -- 2025-06-25 39.5 -105.0
//! ```

use astronight::{format_duration, parse_iso_date, NightConfig, NightData, Observer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let date = parse_iso_date(args.first().map_or("2025-06-25", String::as_str))?;
    let lat: f64 = args.get(1).map_or(Ok(39.5), |s| s.parse::<f64>())?;
    let lng: f64 = args.get(2).map_or(Ok(-105.0), |s| s.parse::<f64>())?;

    let observer = Observer::new(lat, lng)?;
    let night = NightData::compute(date, &observer, &NightConfig::default())?;

    println!("Night of {date} at ({lat}, {lng})");
    match night.darkness_window {
        Some(dark) => println!(
            "  darkness:  {dark} ({})",
            format_duration(dark.duration_minutes())
        ),
        None => println!("  darkness:  none"),
    }

    let lunar = &night.lunar;
    println!(
        "  moon:      {} {} ({:.0}% lit)",
        lunar.phase_name.icon(),
        lunar.phase_name,
        lunar.fraction * 100.0
    );

    match night.milky_way.peak {
        Some(peak) => println!(
            "  core peak: {} at {} az {}",
            peak.altitude, peak.time, peak.azimuth
        ),
        None => println!("  core peak: not sampled"),
    }

    match &night.shooting_window {
        Some(window) => println!("  shoot:     {window}"),
        None => println!("  shoot:     no window"),
    }
    if let Some(bearing) = night.core_bearing() {
        println!("  face:      {bearing}");
    }
    println!("  quality:   {}", night.quality());

    Ok(())
}
