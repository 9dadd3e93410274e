use clap::Parser;
use epa_hourly::cli::{self, Args};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match cli::run(command) {
        Ok(stats) => {
            // A batch where nothing decoded is reported as a failure
            if stats.total_lines > 0 && stats.hours_decoded == 0 {
                process::exit(2);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("EPA Hourly - fixed-width hourly climate data decoder");
    println!("====================================================");
    println!();
    println!("Decode EPA hourly weather files (one line per observed hour) into");
    println!("typed records and report malformed lines.");
    println!();
    println!("USAGE:");
    println!("    epa-hourly <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode the hourly files of a station");
    println!("    layout      Print the column layout of a record line");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode Worcester 1975 (data/worcester/hourly/w94746.h75):");
    println!("    epa-hourly decode --location worcester --station 94746 --year 75");
    println!();
    println!("    # Decode every year on file and stop at the first bad line:");
    println!("    epa-hourly decode -l worcester -s 94746 --all-years --on-error abort");
    println!();
    println!("For detailed help on any command, use:");
    println!("    epa-hourly <COMMAND> --help");
}
