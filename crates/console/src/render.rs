//! Plain-text rendering of game output.

use std::io::{self, Write};

use crossterm::style::Stylize;
use ponzi_core::{
    models::format_money, GameAction, GameSummary, InvitationProposal, Notice, PayoutDemand,
    RefundClaim, StatusReport,
};

pub fn intro(out: &mut impl Write, organizer: &str) -> io::Result<()> {
    writeln!(out, "{}", "PONZI SCHEME - YOU RUN THE PYRAMID!".bold().yellow())?;
    writeln!(out, "You: {organizer} (organizer)")?;
    writeln!(out, "Your job: decide who gets paid and who gets burned!")?;
    writeln!(out)
}

pub fn notice(out: &mut impl Write, notice: &Notice) -> io::Result<()> {
    match notice {
        Notice::RoundStarted { round, treasury } => {
            writeln!(out)?;
            writeln!(out, "{}", format!("=== ROUND {round} ===").bold().cyan())?;
            writeln!(out, "Money in the pyramid: {}", format_money(*treasury))
        }
        Notice::Joined { name, investment } => writeln!(
            out,
            "{}",
            format!("{name} joined with {}", format_money(*investment)).green()
        ),
        Notice::PaymentMade { name, .. } => {
            writeln!(out, "{}", format!("{name} got paid!").green())
        }
        Notice::PaymentRefused { .. } => writeln!(
            out,
            "{}",
            "Not enough money in the pyramid for that payout!".red()
        ),
        Notice::NobodyPaid => writeln!(out, "{}", "Nobody got paid!".yellow()),
        Notice::TurnedAngry { name } => {
            writeln!(out, "{}", format!("{name} got angry and left!").red())
        }
        Notice::InvitationAccepted { invitee, .. } => {
            writeln!(out, "{}", format!("{invitee} joined!").green())
        }
        Notice::InvitationDeclined { .. } => writeln!(out, "You blocked the invitation"),
        Notice::BonusRefused { inviter, bonus } => writeln!(
            out,
            "{}",
            format!(
                "No money left for {inviter}'s {} referral bonus",
                format_money(*bonus)
            )
            .red()
        ),
        Notice::Event(event) => {
            writeln!(out)?;
            writeln!(out, "{} {}", "EVENT:".bold().magenta(), event.headline())
        }
        Notice::FledPolice { name } => writeln!(out, "{name} got scared and left"),
        Notice::AnonymousDeposit { amount } => writeln!(
            out,
            "{}",
            format!("Someone anonymously deposited {}!", format_money(*amount)).green()
        ),
        Notice::RefundPaid { name, amount } => {
            writeln!(out, "{name} got back {}", format_money(*amount))
        }
        Notice::RefundRefused { name, amount, .. } => writeln!(
            out,
            "{}",
            format!(
                "Not enough money to refund {} to {name}",
                format_money(*amount)
            )
            .red()
        ),
        Notice::RefundsDeclined => writeln!(out, "{}", "You refused to refund anyone".yellow()),
    }
}

pub fn demands(out: &mut impl Write, demands: &[PayoutDemand]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Participants demand payouts:".bold())?;
    for (index, demand) in demands.iter().enumerate() {
        writeln!(
            out,
            "{}. {} expects {} (invested {})",
            index + 1,
            demand.name,
            format_money(demand.expected),
            format_money(demand.invested)
        )?;
    }
    writeln!(out)?;
    write!(out, "Who gets PAID? (enter a number, 0 for nobody): ")
}

pub fn proposal(out: &mut impl Write, proposal: &InvitationProposal) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} wants to invite {} with a stake of {}",
        proposal.inviter_name,
        proposal.invitee,
        format_money(proposal.investment)
    )?;
    write!(out, "Allow? (y/n): ")
}

pub fn claims(out: &mut impl Write, claims: &[RefundClaim]) -> io::Result<()> {
    writeln!(out, "These participants want their money back:")?;
    for claim in claims {
        writeln!(
            out,
            "- {} (invested {})",
            claim.name,
            format_money(claim.invested)
        )?;
    }
    write!(out, "Refund everyone? (y/n): ")
}

pub fn status(out: &mut impl Write, report: &StatusReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "PYRAMID STATUS:".bold())?;
    writeln!(out, " Money in the system: {}", format_money(report.treasury))?;
    writeln!(out, " Active participants: {}", report.active)?;
    writeln!(out, " Departed: {}", report.departed)?;

    if !report.top.is_empty() {
        writeln!(out)?;
        writeln!(out, " Top participants:")?;
        for standing in &report.top {
            writeln!(
                out,
                "  {}: {} (invested: {})",
                standing.name,
                format_money(standing.funds),
                format_money(standing.invested)
            )?;
        }
    }
    Ok(())
}

pub fn history(out: &mut impl Write, actions: &[GameAction]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "ACTION HISTORY:".bold())?;
    for action in actions {
        writeln!(out, "{action}")?;
    }
    Ok(())
}

pub fn summary(out: &mut impl Write, summary: &GameSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "GAME OVER!".bold().red())?;
    writeln!(out, " Your profit: {}", format_money(summary.organizer_profit))?;
    writeln!(out, " Participants recruited: {}", summary.participants)?;
    writeln!(out, " Final treasury: {}", format_money(summary.final_treasury))?;
    writeln!(out, " Biggest pyramid: {}", format_money(summary.peak_treasury))?;
    if let Some(richest) = &summary.richest {
        writeln!(
            out,
            " Most successful participant: {} with {}",
            richest.name,
            format_money(richest.funds)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponzi_core::{Money, ParticipantId, Standing};

    fn render(draw: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        draw(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn demands_are_numbered_from_one() {
        let listing = vec![
            PayoutDemand {
                id: ParticipantId(0),
                name: "Alexei".to_string(),
                invested: Money::from(200),
                expected: Money::from(60),
            },
            PayoutDemand {
                id: ParticipantId(1),
                name: "Maria".to_string(),
                invested: Money::from(150),
                expected: Money::from(45),
            },
        ];
        let text = render(|out| demands(out, &listing));
        assert!(text.contains("1. Alexei expects $60.00 (invested $200.00)"));
        assert!(text.contains("2. Maria expects $45.00 (invested $150.00)"));
    }

    #[test]
    fn summary_names_richest() {
        let report = GameSummary {
            organizer: "Boss".to_string(),
            organizer_profit: Money::ZERO,
            participants: 12,
            final_treasury: Money::from(-3),
            peak_treasury: Money::from(2400),
            richest: Some(Standing {
                name: "Olga7".to_string(),
                funds: Money::from(640),
                invested: Money::from(300),
            }),
        };
        let text = render(|out| summary(out, &report));
        assert!(text.contains("Participants recruited: 12"));
        assert!(text.contains("Biggest pyramid: $2400.00"));
        assert!(text.contains("Olga7 with $640.00"));
    }

    #[test]
    fn status_skips_top_list_when_nobody_is_active() {
        let report = StatusReport {
            round: 3,
            treasury: Money::from(10),
            active: 0,
            departed: 4,
            top: Vec::new(),
        };
        let text = render(|out| status(out, &report));
        assert!(text.contains("Departed: 4"));
        assert!(!text.contains("Top participants"));
    }
}
