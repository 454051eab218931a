//! Line-based organizer input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use ponzi_core::{InvitationProposal, Notice, Operator, PayoutDemand, RefundClaim};
use tracing::{debug, warn};

use crate::render;

const DEFAULT_ORGANIZER: &str = "Organizer";

/// Map the payout prompt answer to a zero-based index.
///
/// Only `1..=count` selects someone; zero, out-of-range and unparsable input
/// all mean nobody.
pub fn parse_payout_choice(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Some(choice - 1),
        _ => None,
    }
}

/// Only `y` (any case) approves.
pub fn is_affirmative(input: &str) -> bool {
    input.trim_end_matches(['\r', '\n']).to_lowercase() == "y"
}

/// Organizer driven through a reader and a writer, normally stdin and stdout.
///
/// Write failures cannot surface through [`Operator`], so the first one is
/// kept and returned by [`ConsoleOperator::check`].
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    failure: Option<io::Error>,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            failure: None,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for the organizer's display name.
    pub fn ask_organizer_name(&mut self) -> Result<String> {
        writeln!(self.output, "Enter your name as the organizer of the pyramid:")
            .context("failed to write name prompt")?;
        self.output.flush()?;
        let name = self
            .read_line()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string());
        Ok(name)
    }

    /// Block until the organizer presses Enter.
    pub fn pause(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Press Enter for the next round...")
            .context("failed to write pause prompt")?;
        self.output.flush()?;
        self.read_line();
        Ok(())
    }

    /// Return the first write failure seen since the last check.
    pub fn check(&mut self) -> io::Result<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(err) => {
                warn!(%err, "Failed to read organizer input");
                None
            }
        }
    }

    fn write(&mut self, draw: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = draw(&mut self.output).and_then(|()| self.output.flush()) {
            self.failure = Some(err);
        }
    }

    fn answer(&mut self) -> String {
        self.read_line().unwrap_or_default()
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn notify(&mut self, notice: &Notice) {
        self.write(|out| render::notice(out, notice));
    }

    fn choose_payout(&mut self, demands: &[PayoutDemand]) -> Option<usize> {
        self.write(|out| render::demands(out, demands));
        let answer = self.answer();
        let choice = parse_payout_choice(&answer, demands.len());
        debug!(?choice, "Payout choice");
        choice
    }

    fn approve_invitation(&mut self, proposal: &InvitationProposal) -> bool {
        self.write(|out| render::proposal(out, proposal));
        is_affirmative(&self.answer())
    }

    fn approve_refunds(&mut self, claims: &[RefundClaim]) -> bool {
        self.write(|out| render::claims(out, claims));
        is_affirmative(&self.answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use ponzi_core::{Money, ParticipantId};

    fn console(input: &str) -> ConsoleOperator<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleOperator::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn demand(index: usize) -> PayoutDemand {
        PayoutDemand {
            id: ParticipantId(index),
            name: format!("P{index}"),
            invested: Money::from(100),
            expected: Money::from(30),
        }
    }

    #[test]
    fn payout_choice_accepts_only_listed_numbers() {
        assert_eq!(parse_payout_choice("1\n", 2), Some(0));
        assert_eq!(parse_payout_choice(" 2 ", 2), Some(1));
        assert_eq!(parse_payout_choice("0", 2), None);
        assert_eq!(parse_payout_choice("3", 2), None);
        assert_eq!(parse_payout_choice("-1", 2), None);
        assert_eq!(parse_payout_choice("two", 2), None);
        assert_eq!(parse_payout_choice("", 2), None);
    }

    #[test]
    fn only_y_approves() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y\r\n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn organizer_name_falls_back_when_blank() -> Result<()> {
        assert_eq!(console("Boss\n").ask_organizer_name()?, "Boss");
        assert_eq!(console("   \n").ask_organizer_name()?, "Organizer");
        assert_eq!(console("").ask_organizer_name()?, "Organizer");
        Ok(())
    }

    #[test]
    fn prompts_read_one_line_each() {
        let mut operator = console("2\ny\nnope\n");
        let demands = [demand(0), demand(1)];
        assert_eq!(operator.choose_payout(&demands), Some(1));
        assert!(operator.approve_invitation(&InvitationProposal {
            inviter: ParticipantId(0),
            inviter_name: "P0".to_string(),
            invitee: "Anna5".to_string(),
            investment: Money::from(80),
        }));
        assert!(!operator.approve_refunds(&[]));
        // Input exhausted: every further decision declines.
        assert_eq!(operator.choose_payout(&demands), None);

        let text = String::from_utf8(operator.output().clone()).unwrap();
        assert!(text.contains("P0 wants to invite Anna5"));
        assert!(operator.check().is_ok());
    }
}
