use event_logs::table::CsvTableOptions;
use event_logs::{EventLog, EventLogOptions, SimplifiedEventLog, Table};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 && args.len() != 5 {
        eprintln!(
            "Usage: {} <path_to_csv> [<case_id_column> <activity_column> <timestamp_column>]",
            args[0]
        );
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    println!("Loading events from {:?}", path);
    let table = Table::from_csv_path(&path, &CsvTableOptions::default())?;

    let options = EventLogOptions {
        case_id: args.get(2).cloned(),
        activity: args.get(3).cloned(),
        timestamp: args.get(4).cloned(),
        verbose: true,
        ..Default::default()
    };
    let log = EventLog::with_options(&table, options)?;
    let simplified = SimplifiedEventLog::try_from(&log)?;
    println!("Number of events: {}", log.num_events());
    println!("Number of cases: {}", simplified.len());

    let variants = simplified.variants();
    println!("Number of variants: {}", variants.len());
    for (activities, count) in variants.iter().take(10) {
        println!("{:>6}  {}", count, activities.join(" -> "));
    }
    Ok(())
}
