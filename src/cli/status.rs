use car_rental::{Config, RentalService, domain::Status as Occupancy};
use clap::Parser;
use tracing::instrument;

use super::terminal::{Palette, is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "Show the catalog and the occupancy of every car")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let service = RentalService::from_config(config);

        match self.output {
            OutputFormat::Json => println!("{}", Self::render_json(&service)?),
            OutputFormat::Table if self.quiet => println!("{}", Self::render_quiet(&service)),
            OutputFormat::Table => {
                print!("{}", Self::render_table(&service, Palette::detect(), is_narrow()));
            }
        }

        Ok(())
    }

    fn render_json(service: &RentalService) -> anyhow::Result<String> {
        use serde_json::json;

        let cars: Vec<_> = service
            .cars()
            .iter()
            .map(|car| {
                json!({
                    "id": car.id().as_str(),
                    "brand": car.brand(),
                    "model": car.model(),
                    "price_per_day": car.price_per_day().to_string(),
                    "available": car.is_available(),
                    "renter": car.renter().map(ToString::to_string),
                })
            })
            .collect();

        let output = json!({
            "cars": cars,
            "available": service.list_available().count(),
            "rented": service.list_rented().count(),
        });

        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn render_quiet(service: &RentalService) -> String {
        format!(
            "available={} rented={}",
            service.list_available().count(),
            service.list_rented().count()
        )
    }

    fn render_table(service: &RentalService, palette: Palette, narrow: bool) -> String {
        let mut out = String::from("Current Car Status:\n\n");

        if narrow {
            // Stacked output for narrow terminals
            for line in service.current_status() {
                out.push_str(&format!("{line}\n"));
            }
            return out;
        }

        out.push_str(&format!(
            "{:<6} {:<28} {:>10}  {}\n",
            "ID", "Car", "Rate/day", "Status"
        ));
        for car in service.cars() {
            let name = format!("{} {}", car.brand(), car.model());
            let rate = car.price_per_day().to_string();
            let status = match car.status() {
                Occupancy::Available => palette.success("Available"),
                Occupancy::Rented { renter } => palette.warning(&format!("Rented by {renter}")),
            };
            out.push_str(&format!(
                "{:<6} {name:<28} {rate:>10}  {status}\n",
                car.id().as_str()
            ));
        }

        let summary = format!(
            "{} available, {} rented",
            service.list_available().count(),
            service.list_rented().count()
        );
        out.push('\n');
        out.push_str(&palette.dim(&summary));
        out.push('\n');
        out
    }
}
