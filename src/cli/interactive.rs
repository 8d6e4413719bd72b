use std::io::{self, Write};

use car_rental::{CarId, Config, RentalService};
use dialoguer::{Input, Select};
use tracing::instrument;

use super::{report, terminal::Palette};

#[derive(Debug, clap::Parser)]
#[command(about = "Run a guided rental session with menus and prompts")]
pub struct Interactive {}

const MENU: [&str; 5] = [
    "Rent a car",
    "Return a car",
    "Car status",
    "Rental history",
    "Quit",
];

impl Interactive {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut service = RentalService::from_config(config);
        let palette = Palette::detect();

        loop {
            let choice = Select::new()
                .with_prompt("What would you like to do?")
                .items(&MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => rent(&mut service, palette)?,
                1 => return_car(&mut service, palette)?,
                2 => print!("{}", report::status_view(&service)),
                3 => print!("{}", report::history_view(&service)),
                _ => break,
            }
        }

        Ok(())
    }
}

fn rent(service: &mut RentalService, palette: Palette) -> anyhow::Result<()> {
    let customer = prompt_text("Customer name")?;
    let days = prompt_text("Rental days")?;
    let candidates: Vec<CarId> = service.list_available().cloned().collect();
    let car = select_car(service, "Select car to rent", &candidates)?;

    submit_rent(service, palette, &customer, &days, &car, &mut io::stdout().lock())?;
    Ok(())
}

fn return_car(service: &mut RentalService, palette: Palette) -> anyhow::Result<()> {
    let customer = prompt_text("Customer name")?;
    let candidates: Vec<CarId> = service.list_rented().cloned().collect();
    let car = select_car(service, "Select car to return", &candidates)?;

    submit_return(service, palette, &customer, &car, &mut io::stdout().lock())?;
    Ok(())
}

/// Sends the answers from the rent prompts to the service and reports the
/// outcome, refreshing both views after a successful rental.
fn submit_rent(
    service: &mut RentalService,
    palette: Palette,
    customer: &str,
    days: &str,
    car: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    match service.rent(customer, days, car) {
        Ok(receipt) => {
            writeln!(out, "{}", palette.success(&report::rented(&receipt)))?;
            refresh(service, out)
        }
        Err(error) => writeln!(out, "{}", palette.warning(&report::rent_refused(&error))),
    }
}

fn submit_return(
    service: &mut RentalService,
    palette: Palette,
    customer: &str,
    car: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    match service.return_car(customer, car) {
        Ok(receipt) => {
            writeln!(out, "{}", palette.success(&report::returned(&receipt)))?;
            refresh(service, out)
        }
        Err(error) => writeln!(out, "{}", palette.warning(&report::return_refused(&error))),
    }
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Offers the candidate cars, returning an empty id when there is nothing to
/// choose from so the service reports that no car was selected.
fn select_car(
    service: &RentalService,
    prompt: &str,
    candidates: &[CarId],
) -> anyhow::Result<String> {
    if candidates.is_empty() {
        return Ok(String::new());
    }

    let index = Select::new()
        .with_prompt(prompt)
        .items(&car_labels(service, candidates))
        .default(0)
        .interact()?;

    Ok(candidates[index].to_string())
}

fn car_labels(service: &RentalService, candidates: &[CarId]) -> Vec<String> {
    candidates
        .iter()
        .map(|id| service.car(id).map_or_else(|| id.to_string(), |car| car.describe()))
        .collect()
}

fn refresh(service: &RentalService, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", report::status_view(service))?;
    writeln!(out)?;
    write!(out, "{}", report::history_view(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn successful_rental_reports_and_refreshes_views() {
        let mut service = RentalService::default();
        let mut out = Vec::new();

        submit_rent(&mut service, Palette::plain(), "alice", "2", "C101", &mut out).unwrap();

        let out = output(out);
        assert!(out.starts_with(
            "Alice rented C101 - Maruti Suzuki Alto K10 (₹2600/day) for 2 days.\nTotal: ₹5200\n"
        ));
        assert!(out.contains("Current Car Status:\n"));
        assert!(out.contains("C101 - Maruti Suzuki Alto K10 (₹2600/day) [Rented by Alice]\n"));
        assert!(out.ends_with(
            "Rental History:\n\n\
             Alice rented C101 - Maruti Suzuki Alto K10 (₹2600/day) for 2 days. Total: ₹5200\n"
        ));
    }

    #[test]
    fn refused_rental_reports_without_refreshing() {
        let mut service = RentalService::default();
        let mut out = Vec::new();

        submit_rent(&mut service, Palette::plain(), "alice", "zero", "C101", &mut out).unwrap();

        assert_eq!(output(out), "Enter a valid number of days.\n");
        assert!(service.history().is_empty());
    }

    #[test]
    fn nothing_to_select_is_refused_as_no_car() {
        let mut service = RentalService::default();
        let candidates: Vec<CarId> = service.list_rented().cloned().collect();
        let car = select_car(&service, "Select car to return", &candidates).unwrap();
        assert_eq!(car, "");

        let mut out = Vec::new();
        submit_return(&mut service, Palette::plain(), "alice", &car, &mut out).unwrap();
        assert_eq!(output(out), "No car selected to return.\n");
    }

    #[test]
    fn return_by_someone_else_is_refused() {
        let mut service = RentalService::default();
        service.rent("alice", "1", "C103").unwrap();
        let mut out = Vec::new();

        submit_return(&mut service, Palette::plain(), "bob", "C103", &mut out).unwrap();

        assert_eq!(
            output(out),
            "This car was not rented by bob. It was rented by Alice.\n"
        );
        assert_eq!(service.list_rented().count(), 1);
    }

    #[test]
    fn successful_return_frees_the_car() {
        let mut service = RentalService::default();
        service.rent("alice", "1", "C103").unwrap();
        let mut out = Vec::new();

        submit_return(&mut service, Palette::plain(), " ALICE ", "C103", &mut out).unwrap();

        let out = output(out);
        let description = service.car("C103").unwrap().describe();
        assert!(out.starts_with(&format!("Car {description} has been returned by Alice.\n")));
        assert!(out.ends_with(&format!("Alice returned {description}\n")));
        assert_eq!(service.list_rented().count(), 0);
    }

    #[test]
    fn choices_are_labelled_with_car_descriptions() {
        let service = RentalService::default();
        let candidates: Vec<CarId> = service.list_available().take(2).cloned().collect();
        let second = service.car("C102").unwrap().describe();

        assert_eq!(
            car_labels(&service, &candidates),
            ["C101 - Maruti Suzuki Alto K10 (₹2600/day)", second.as_str()]
        );
    }
}
