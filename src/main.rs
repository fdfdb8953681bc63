use clap::{Parser, Subcommand};

mod csv;
mod model;
mod render;
mod stage;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "alluvial-viz")]
#[command(about = "Passenger-flow alluvial diagram generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an alluvial (Sankey) report from a passenger CSV.
    Report {
        /// Passenger table (train.csv shape).
        #[arg(long)]
        data: String,

        /// Comma-separated stage chain; at least two of class, sex,
        /// age-group, outcome.
        #[arg(long, default_value = "class,sex,age-group,outcome")]
        stages: String,

        #[arg(long, default_value = "Titanic Survival Alluvial Diagram")]
        title: String,

        #[arg(short = 'o', long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report {
            data,
            stages,
            title,
            out,
        } => {
            // 1) Validate the configured stage chain up front.
            let stages = stage::parse_stage_list(&stages)?;

            // 2) Parse the passenger table.
            let records = csv::parse_csv_file(&data)?;

            // 3) Aggregate adjacent stage pairs into counted flows.
            let flow = model::aggregate(&records, &stages, &title)?;

            // 4) Render HTML.
            let html = render::render_html_report(&flow)?;
            std::fs::write(&out, html)?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}
