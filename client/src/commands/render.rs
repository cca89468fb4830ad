use colorful::{Color, Colorful};
use labi_indexer::schema::{EventRecord, RecordPayload, UserSummary};
use labi_stake::{
    states::{TxFailure, TxState},
    view::{
        Notice, NoticeKind, RewardsView, StakeFormView, StakePositionsView, StakingStatsView,
        TokenMintingView,
    },
};

fn heading(title: &str) {
    println!("{}", title.color(Color::Blue).bold());
}

fn row(label: &str, value: &str) {
    println!("  {:<24} {}", label, value);
}

pub fn print_notice(notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Info => Color::Blue,
        NoticeKind::Error => Color::Red,
    };
    println!("{}", notice.message.as_str().color(color));
}

pub fn print_tx_state(state: &TxState) {
    match state {
        TxState::Idle => {}
        TxState::PendingSignature => {
            println!("{}", "Waiting for wallet signature...".color(Color::Yellow))
        }
        TxState::Confirming(hash) => println!(
            "{} {}",
            "Confirming".color(Color::Yellow),
            hash
        ),
        TxState::Confirmed(receipt) => println!(
            "{} {}",
            "Confirmed".color(Color::Green),
            receipt.transaction_hash
        ),
        TxState::Failed(TxFailure::Rejected(_)) => {
            println!("{}", "Rejected in the wallet".color(Color::Red))
        }
        TxState::Failed(failure) => println!("{}", failure.to_string().as_str().color(Color::Red)),
    }
}

pub fn print_stats(view: &StakingStatsView) {
    heading("Staking Statistics");
    row("Your staked", &format!("{} {}", view.user_total_staked, view.symbol));
    row("Total staked", &format!("{} {}", view.total_staked, view.symbol));
    row("APR", &view.apr);
    row("Lock period", &view.lock_period);
    row("Early withdrawal penalty", &view.emergency_penalty);
}

pub fn print_token(view: &TokenMintingView) {
    heading(&format!("{} ({})", view.name, view.symbol));
    row("Balance", &format!("{} {}", view.balance, view.symbol));
    row("Total supply", &view.total_supply);
}

pub fn print_stake_form(view: &StakeFormView) {
    heading(&format!("Stake {}", view.symbol));
    row("Balance", &format!("{} {}", view.balance, view.symbol));
    row("Amount", &view.input);
    row("Limits", &view.range_hint);
    if let Some(message) = &view.validation {
        println!("{}", message.as_str().color(Color::Red));
    } else if view.submit_enabled {
        println!("{}", view.button_label.as_str().color(Color::Green));
    }
}

pub fn print_positions(view: &StakePositionsView) {
    heading("Your Stake Positions");
    if view.is_empty() {
        println!("  No active stakes");
        return;
    }
    for position in &view.positions {
        println!("{}", format!("  Stake #{}", position.stake_id).as_str().bold());
        row("Amount", &position.amount);
        row("Estimated rewards", &position.estimated_rewards);
        row("Staked on", &position.staked_on);
        row("Unlocks on", &position.unlocks_on);
        let status = if position.unlocked {
            position.countdown.as_str().color(Color::Green)
        } else {
            position.countdown.as_str().color(Color::Yellow)
        };
        row("Status", &status.to_string());
        row("Normal withdraw", &position.normal_withdraw_label);
        row("Emergency withdraw", &position.emergency_preview);
    }
}

pub fn print_rewards(view: &RewardsView) {
    heading("Your Rewards");
    row("Pending", &format!("{} {}", view.pending, view.symbol));
    row("Daily (estimated)", &format!("~{} {}", view.daily_estimate, view.symbol));
    row("Staked", &format!("{} {}", view.user_total_staked, view.symbol));
    let action = if view.claim_enabled {
        view.claim_label.as_str().color(Color::Green)
    } else {
        view.claim_label.as_str().color(Color::DarkGray)
    };
    row("Action", &action.to_string());
}

pub fn print_summary(summary: &UserSummary) {
    heading(&format!("User {}", summary.id));
    row("Total staked", &summary.total_staked.to_string());
    row("Rewards claimed", &summary.total_rewards_claimed.to_string());
    row("Stake count", &summary.stake_count.to_string());
    row("First seen", &summary.first_stake_timestamp.to_string());
    row("Last activity", &summary.last_activity_timestamp.to_string());
    row("Active", &summary.is_active.to_string());
    row("Block", &summary.block.block_number.to_string());
}

pub fn print_record(record: &EventRecord) {
    let detail = match &record.payload {
        RecordPayload::Staked {
            amount,
            new_total_staked,
            ..
        } => format!("amount {} total {}", amount, new_total_staked),
        RecordPayload::Withdrawn { amount } => format!("amount {}", amount),
        RecordPayload::RewardsClaimed { reward_amount } => format!("reward {}", reward_amount),
        RecordPayload::Deposited {
            amount,
            new_user_balance,
        } => format!("amount {} balance {}", amount, new_user_balance),
        RecordPayload::StakeWithdrawn {
            amount,
            remaining_balance,
        } => format!("amount {} remaining {}", amount, remaining_balance),
        RecordPayload::EarlyWithdrawal {
            amount,
            penalty_amount,
            actual_received,
        } => format!(
            "amount {} penalty {} received {}",
            amount, penalty_amount, actual_received
        ),
    };
    println!(
        "  {:<16} block {:<10} {}",
        record.kind().to_string().as_str().color(Color::Blue),
        record.block.block_number,
        detail
    );
}
