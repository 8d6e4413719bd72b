use std::io::{self, BufRead, IsTerminal, Write};

use car_rental::{CarId, Config, RentalService};
use tracing::{debug, instrument};

use super::{report, terminal::Palette};

const HELP: &str = "\
Commands:
  rent <days> <car-id> <name>   Rent a car
  return <car-id> <name>        Return a rented car
  status                        Show every car and who has it
  history                       Show all rentals and returns
  available                     List cars that can be rented
  rented                        List cars that can be returned
  help                          Show this message
  quit                          Leave the session";

#[derive(Debug, Default, clap::Parser)]
#[command(about = "Run a rental session, reading commands from stdin")]
pub struct Shell {
    /// Don't re-print status and history after each rental or return
    #[arg(long)]
    no_refresh: bool,
}

impl Shell {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut service = RentalService::from_config(config);
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();

        let mut session = Session {
            service: &mut service,
            palette: Palette::detect(),
            refresh: !self.no_refresh,
        };
        session.drive(stdin.lock(), &mut io::stdout().lock(), prompt)?;
        Ok(())
    }
}

/// A single line of input, split into its command and raw arguments.
///
/// Arguments are passed through untouched; the service decides whether
/// they are valid.
#[derive(Debug, PartialEq, Eq)]
enum Request<'a> {
    Rent {
        days: &'a str,
        car: &'a str,
        customer: &'a str,
    },
    Return {
        car: &'a str,
        customer: &'a str,
    },
    Status,
    History,
    Available,
    Rented,
    Help,
    Quit,
    Blank,
    Unknown(&'a str),
}

impl<'a> Request<'a> {
    fn parse(line: &'a str) -> Self {
        let (command, rest) = next_word(line);
        match command.to_ascii_lowercase().as_str() {
            "" => Self::Blank,
            "rent" => {
                let (days, rest) = next_word(rest);
                let (car, customer) = next_word(rest);
                Self::Rent {
                    days,
                    car,
                    customer,
                }
            }
            "return" => {
                let (car, customer) = next_word(rest);
                Self::Return { car, customer }
            }
            "status" => Self::Status,
            "history" => Self::History,
            "available" => Self::Available,
            "rented" => Self::Rented,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(command),
        }
    }
}

/// Splits off the first whitespace-delimited word.
///
/// Missing words come back empty, so an incomplete command still reaches the
/// service and is refused with the usual message.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    s.split_once(char::is_whitespace)
        .map_or((s, ""), |(word, rest)| (word, rest.trim_start()))
}

struct Session<'a> {
    service: &'a mut RentalService,
    palette: Palette,
    refresh: bool,
}

impl Session<'_> {
    fn drive(
        &mut self,
        mut input: impl BufRead,
        out: &mut impl Write,
        prompt: bool,
    ) -> io::Result<()> {
        if prompt {
            writeln!(out, "{}", self.palette.info("Car Rental System"))?;
            writeln!(out, "{}", self.palette.dim("Type 'help' for a list of commands."))?;
        }

        let mut line = String::new();
        loop {
            if prompt {
                write!(out, "rental> ")?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let request = Request::parse(&line);
            debug!(?request, "handling request");
            if request == Request::Quit {
                break;
            }
            self.handle(request, out)?;
        }

        Ok(())
    }

    fn handle(&mut self, request: Request<'_>, out: &mut impl Write) -> io::Result<()> {
        match request {
            Request::Rent {
                days,
                car,
                customer,
            } => match self.service.rent(customer, days, car) {
                Ok(receipt) => {
                    writeln!(out, "{}", self.palette.success(&report::rented(&receipt)))?;
                    self.refresh_views(out)?;
                }
                Err(error) => {
                    writeln!(out, "{}", self.palette.warning(&report::rent_refused(&error)))?;
                }
            },
            Request::Return { car, customer } => match self.service.return_car(customer, car) {
                Ok(receipt) => {
                    writeln!(out, "{}", self.palette.success(&report::returned(&receipt)))?;
                    self.refresh_views(out)?;
                }
                Err(error) => {
                    writeln!(out, "{}", self.palette.warning(&report::return_refused(&error)))?;
                }
            },
            Request::Status => write!(out, "{}", report::status_view(self.service))?,
            Request::History => write!(out, "{}", report::history_view(self.service))?,
            Request::Available => writeln!(
                out,
                "Cars available to rent: {}",
                id_list(self.service.list_available())
            )?,
            Request::Rented => writeln!(
                out,
                "Cars available to return: {}",
                id_list(self.service.list_rented())
            )?,
            Request::Help => writeln!(out, "{HELP}")?,
            Request::Unknown(command) => writeln!(
                out,
                "{}",
                self.palette.warning(&format!(
                    "Unknown command '{command}'. Type 'help' for a list of commands."
                ))
            )?,
            Request::Blank | Request::Quit => {}
        }
        Ok(())
    }

    /// Re-renders both panes after a change, as the views are derived rather
    /// than updated in place.
    fn refresh_views(&self, out: &mut impl Write) -> io::Result<()> {
        if self.refresh {
            writeln!(out)?;
            write!(out, "{}", report::status_view(self.service))?;
            writeln!(out)?;
            write!(out, "{}", report::history_view(self.service))?;
        }
        Ok(())
    }
}

fn id_list<'a>(ids: impl Iterator<Item = &'a CarId>) -> String {
    let ids: Vec<&str> = ids.map(CarId::as_str).collect();
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str, refresh: bool) -> (RentalService, String) {
        let mut service = RentalService::default();
        let mut out = Vec::new();
        Session {
            service: &mut service,
            palette: Palette::plain(),
            refresh,
        }
        .drive(script.as_bytes(), &mut out, false)
        .unwrap();
        (service, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(
            Request::parse("rent 2 C101 mary ann\n"),
            Request::Rent {
                days: "2",
                car: "C101",
                customer: "mary ann"
            }
        );
        assert_eq!(
            Request::parse("  RETURN   C101   Alice  "),
            Request::Return {
                car: "C101",
                customer: "Alice"
            }
        );
        assert_eq!(Request::parse("status"), Request::Status);
        assert_eq!(Request::parse("Exit"), Request::Quit);
        assert_eq!(Request::parse("   \n"), Request::Blank);
        assert_eq!(Request::parse("fly away"), Request::Unknown("fly"));
    }

    #[test]
    fn missing_arguments_come_through_empty() {
        assert_eq!(
            Request::parse("rent 3"),
            Request::Rent {
                days: "3",
                car: "",
                customer: ""
            }
        );
        assert_eq!(
            Request::parse("return"),
            Request::Return {
                car: "",
                customer: ""
            }
        );
    }

    #[test]
    fn session_runs_the_rent_and_return_scenario() {
        let (service, output) = run(
            "rent 2 C101 alice\nreturn C101 bob\nreturn C101 ALICE\nquit\nrent 1 C102 never\n",
            false,
        );

        assert_eq!(
            output,
            "Alice rented C101 - Maruti Suzuki Alto K10 (₹2600/day) for 2 days.\nTotal: ₹5200\n\
             This car was not rented by bob. It was rented by Alice.\n\
             Car C101 - Maruti Suzuki Alto K10 (₹2600/day) has been returned by Alice.\n"
        );
        assert_eq!(service.history().len(), 2);
        assert_eq!(service.list_rented().count(), 0);
    }

    #[test]
    fn successful_changes_refresh_both_views() {
        let (_, output) = run("rent 1 C106 bob\n", true);

        assert!(output.contains("Current Car Status:\n\n"));
        assert!(output.contains("C106 - Renault Kwid (₹2300/day) [Rented by Bob]\n"));
        assert!(output.ends_with(
            "Rental History:\n\nBob rented C106 - Renault Kwid (₹2300/day) for 1 day. Total: ₹2300\n"
        ));
    }

    #[test]
    fn refusals_do_not_refresh_views() {
        let (service, output) = run("rent 0 C101 alice\nrent 1 C101\n", true);

        assert_eq!(
            output,
            "Enter a valid number of days.\nPlease enter your name.\n"
        );
        assert!(service.history().is_empty());
    }

    #[test]
    fn listings_track_availability() {
        let (_, output) = run("rent 1 C102 a\nrent 1 C104 b\navailable\nrented\n", false);

        assert!(output.contains("Cars available to rent: C101, C103, C105, C106\n"));
        assert!(output.contains("Cars available to return: C102, C104\n"));
    }

    #[test]
    fn empty_listing_says_none() {
        let (_, output) = run("rented\n", false);
        assert_eq!(output, "Cars available to return: (none)\n");
    }

    #[test]
    fn unknown_commands_are_reported() {
        let (_, output) = run("fly\n", false);
        assert_eq!(
            output,
            "Unknown command 'fly'. Type 'help' for a list of commands.\n"
        );
    }
}
