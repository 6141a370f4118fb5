use std::env;
use std::path::PathBuf;
use std::process;
use tripdatalib::TripDataset;

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");

    println!(" ------------------------------------");
    println!("|  Trip Dataset Utility  | v{version} |");
    println!(" ------------------------------------");
    println!("\nUsage:");
    println!("  tripstats info <input>");
    println!("  tripstats hours <input>");
    println!("  tripstats histogram <input> <hour>");
    println!("\nExamples:");
    println!("  tripstats info trips.csv");
    println!("  tripstats hours trips.csv.gz");
    println!("  tripstats histogram trips.csv 8");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    println!();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    // Dispatch and immediately handle results
    if let Err(e) = run_dispatch(command, &args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_dispatch(cmd: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        "info" => {
            // Guard: Check args count
            let path_str = args.get(2).ok_or("Missing input file path")?;

            // Guard: File must exist
            let abs_path =
                validate_exists(path_str).map_err(|_| format!("File not found: {path_str}"))?;

            run_info(&abs_path)
        }
        "hours" => {
            let path_str = args.get(2).ok_or("Missing input file path")?;
            let abs_path = validate_exists(path_str)?;

            run_hours(&abs_path)
        }
        "histogram" => {
            let path_str = args.get(2).ok_or("Missing input file path")?;
            let hour_str = args.get(3).ok_or("Missing hour argument (0-23)")?;

            // Guard: Hour must be a valid number in range
            let hour: u32 = hour_str
                .parse()
                .map_err(|_| format!("Invalid hour: {hour_str}"))?;

            let abs_path = validate_exists(path_str)?;

            run_histogram(&abs_path, hour)
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn run_info(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    fn format_with_commas(n: usize) -> String {
        let s = n.to_string();
        s.as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }

    let data = TripDataset::from_csv(path)?;

    println!("File Path:    {}", path.display());
    println!("Trip Records: {}", format_with_commas(data.len()));
    if let Some((lat, lon)) = data.mean_position() {
        println!("Mean Pickup:  {lat:.4}, {lon:.4}");
    }
    Ok(())
}

fn run_hours(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = TripDataset::from_csv(path)?;
    let counts = data.hour_counts();
    let max = counts.iter().copied().max().unwrap_or(0);

    println!("Pickups per hour ({} records):\n", data.len());
    for (hour, count) in counts.iter().enumerate() {
        let bar_len = if max == 0 {
            0
        } else {
            (count * 40).div_ceil(max) as usize
        };
        println!("  {hour:>2}:00  {count:>7}  {}", "#".repeat(bar_len));
    }
    Ok(())
}

fn run_histogram(path: &PathBuf, hour: u32) -> Result<(), Box<dyn std::error::Error>> {
    let data = TripDataset::from_csv(path)?;
    let buckets = data.minute_histogram(hour)?;
    let total: u32 = buckets.iter().sum();

    println!("Pickups per minute, {hour}:00 to {}:00 ({total} records):\n", hour + 1);
    for (minute, count) in buckets.iter().enumerate() {
        if *count > 0 {
            println!("  {hour:>2}:{minute:02}  {count:>7}");
        }
    }
    Ok(())
}

// =============================== HELPER FUNCTIONS ===============================

/// Validate that a path exists and is a file. Returns absolute path.
fn validate_exists(path_str: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(format!("File not found: {path_str}").into());
    }
    if !path.is_file() {
        return Err(format!("Path is not a file: {path_str}").into());
    }
    // Return absolute path
    Ok(std::fs::canonicalize(path)?)
}
