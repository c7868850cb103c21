use crate::command::Command;
use crate::error::Result;
use crate::manager::DhtSensorManager;
use crate::reader::DhtReader;
use core::fmt::{self, Write};

/// The polling loop's state: the sensors plus the reporting mode chosen by the host
#[derive(Clone, Debug)]
pub struct Station<R> {
    manager: DhtSensorManager<R>,
    auto: bool,
}

impl<R: DhtReader> Station<R> {
    /// Starts with auto reporting off
    pub fn new(manager: DhtSensorManager<R>) -> Self {
        Self {
            manager,
            auto: false,
        }
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    pub fn auto(&self) -> bool {
        self.auto
    }

    pub fn manager(&self) -> &DhtSensorManager<R> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut DhtSensorManager<R> {
        &mut self.manager
    }

    pub fn begin(&mut self) -> Result<()> {
        self.manager.begin_all()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SendAuto(auto) => {
                if auto != self.auto {
                    log::info!("Auto reporting {}", if auto { "enabled" } else { "disabled" });
                }
                self.auto = auto;
            }
        }
    }

    /// Parses a line received from the host and applies it
    pub fn handle_line(&mut self, line: &str) -> Result<Command> {
        let command = line.parse::<Command>()?;
        self.apply(command);
        Ok(command)
    }

    /// Reads every sensor and writes the report for the current mode
    pub fn poll<W: Write>(&mut self, out: &mut W) -> fmt::Result {
        self.manager.read_all();
        if self.auto {
            self.manager.send_auto(out)
        } else {
            self.manager.debug(out)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::DHTError;
    use crate::reader::Simulator;
    use crate::report::AutoReport;

    fn station() -> Station<Simulator> {
        Station::new([Simulator::default(), Simulator::failing()].into_iter().collect())
    }

    #[test]
    fn debug_until_told_otherwise() {
        let mut station = station();
        station.begin().unwrap();
        assert!(!station.auto());

        let mut out = String::new();
        station.poll(&mut out).unwrap();
        assert_eq!(
            out,
            "Humidity: 33.33%, --.--%, AVG: 33.33%, \
             \tTemperature: 22.22 *C, --.-- *C, AVG: 22.22 *C\r\n"
        );
    }

    #[test]
    fn switches_to_auto_report() {
        let mut station = station();
        assert_eq!(
            station.handle_line("SEND AUTO ON\r\n"),
            Ok(Command::SendAuto(true))
        );

        let mut out = String::new();
        station.poll(&mut out).unwrap();
        assert_eq!(out, "A,22.22,33.33,1\r\n");

        let report: AutoReport = out.parse().unwrap();
        assert_eq!(report.valid_reads, 1);

        station.handle_line("SEND AUTO OFF").unwrap();
        assert!(!station.auto());
    }

    #[test]
    fn unknown_line_keeps_mode() {
        let mut station = station().with_auto(true);
        assert_eq!(
            station.handle_line("RESET"),
            Err(DHTError::UnknownCommandError)
        );
        assert!(station.auto());
    }

    #[test]
    fn polls_refresh_readings() {
        let mut station = station();
        let mut out = String::new();
        station.poll(&mut out).unwrap();
        assert_eq!(station.manager().valid_reads(), 1);

        station
            .manager_mut()
            .sensor_mut(0)
            .unwrap()
            .reader_mut()
            .set_failing(true);
        out.clear();
        station.poll(&mut out).unwrap();
        assert_eq!(station.manager().valid_reads(), 0);
    }
}
