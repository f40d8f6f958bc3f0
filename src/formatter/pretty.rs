use std::io;

use crate::{
    formatter::{FmtFatal, FmtGroupSkipped, FmtReport, FmtTestOutcome, GroupFormatter},
    outcome::{TestFailure, TestStatus},
};

/// When a [`PrettyFormatter`] emits ANSI colors.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Color if the target [supports it](SupportsColor).
    #[default]
    Automatic,
    Always,
    Never,
}

impl From<bool> for ColorSetting {
    fn from(value: bool) -> Self {
        match value {
            true => Self::Always,
            false => Self::Never,
        }
    }
}

/// Whether a write target renders ANSI colors.
///
/// Every terminal handle implements this through [`io::IsTerminal`].
pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}

#[derive(Debug, Clone, Copy)]
enum Color {
    Red,
    Green,
    Yellow,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
        }
    }
}

/// A formatter close to the output of the built in Rust test harness.
///
/// ```text
/// test math::adds ... ok
/// test math::divides ... skipped, skipping test divides
/// group io ... skipped, skipping test group io
///
/// test result: ok. 1 passed; 0 failed; 1 skipped; 1 groups skipped; finished in 0.00s
/// ```
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: Default::default(),
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target,
            color_setting: self.color_setting,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        match self.color_setting {
            ColorSetting::Automatic => self.target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        match self.use_color() {
            true => format!("{}{text}\x1b[0m", color.code()),
            false => text.to_string(),
        }
    }
}

impl<W: io::Write + SupportsColor> GroupFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_test_outcome(
        &mut self,
        FmtTestOutcome {
            group,
            name,
            outcome,
        }: FmtTestOutcome<'_>,
    ) -> Result<(), Self::Error> {
        let status = match &outcome.status {
            TestStatus::Passed => self.paint(Color::Green, "ok"),
            TestStatus::Skipped { reason: None } => self.paint(Color::Yellow, "skipped"),
            TestStatus::Skipped {
                reason: Some(reason),
            } => format!("{}, {reason}", self.paint(Color::Yellow, "skipped")),
            TestStatus::Failed(_) => self.paint(Color::Red, "FAILED"),
        };
        writeln!(self.target, "test {group}::{name} ... {status}")
    }

    fn fmt_group_skipped(
        &mut self,
        FmtGroupSkipped { group, reason }: FmtGroupSkipped<'_>,
    ) -> Result<(), Self::Error> {
        let skipped = self.paint(Color::Yellow, "skipped");
        writeln!(self.target, "group {group} ... {skipped}, {reason}")
    }

    fn fmt_fatal(&mut self, FmtFatal { group, message }: FmtFatal<'_>) -> Result<(), Self::Error> {
        let error = self.paint(Color::Red, "error");
        writeln!(self.target, "{error}: {group}: {message}")
    }

    fn fmt_report(
        &mut self,
        FmtReport {
            outcomes,
            skipped_groups,
            fatal,
            duration,
        }: FmtReport<'_>,
    ) -> Result<(), Self::Error> {
        let mut passed = 0;
        let mut skipped = 0;
        let mut failures = Vec::new();
        for recorded in outcomes {
            match &recorded.outcome.status {
                TestStatus::Passed => passed += 1,
                TestStatus::Skipped { .. } => skipped += 1,
                TestStatus::Failed(failure) => failures.push((recorded, failure)),
            }
        }

        if !failures.is_empty() {
            writeln!(self.target)?;
            writeln!(self.target, "failures:")?;
            for (recorded, failure) in failures.iter() {
                writeln!(self.target)?;
                writeln!(self.target, "---- {}::{} ----", recorded.group, recorded.name)?;
                match failure {
                    TestFailure::Error(err) => writeln!(self.target, "Error: {err}")?,
                    TestFailure::Panicked(msg) => writeln!(self.target, "{msg}")?,
                }
            }
        }

        let result = match failures.is_empty() && fatal == 0 {
            true => self.paint(Color::Green, "ok"),
            false => self.paint(Color::Red, "FAILED"),
        };
        writeln!(self.target)?;
        writeln!(
            self.target,
            "test result: {result}. {passed} passed; {} failed; {skipped} skipped; \
             {skipped_groups} groups skipped; finished in {:.2}s",
            failures.len(),
            duration.as_secs_f64()
        )
    }
}
