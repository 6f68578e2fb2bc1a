#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::ledger::ActionKind;
use state::policy::TierInput;

declare_id!("J3KJusstXTYeas9Mq5kHFAe7dDZxstETfwumBEZiW1xs");

#[program]
pub mod delegated_authority {
    use super::*;

    pub fn create_relationship(
        ctx: Context<CreateRelationship>,
        agent: Pubkey,
        initial_authority: u128,
        ceiling: u128,
        decay_per_second: u128,
    ) -> Result<()> {
        instructions::authority::create_relationship(ctx, agent, initial_authority, ceiling, decay_per_second)
    }

    pub fn heartbeat(ctx: Context<AuthorityAction>) -> Result<()> {
        instructions::authority::heartbeat(ctx)
    }

    pub fn boost(ctx: Context<AuthorityAction>, amount: u128) -> Result<()> {
        instructions::authority::boost(ctx, amount)
    }

    pub fn kill(ctx: Context<AuthorityAction>) -> Result<()> {
        instructions::authority::kill(ctx)
    }

    pub fn slash(ctx: Context<SlashRelationship>, amount: u128) -> Result<()> {
        instructions::authority::slash(ctx, amount)
    }

    pub fn create_policy(
        ctx: Context<CreatePolicy>,
        policy_id: [u8; 32],
        epoch_duration: u64,
        tiers: Vec<TierInput>,
    ) -> Result<()> {
        instructions::policy::create_policy(ctx, policy_id, epoch_duration, tiers)
    }

    pub fn bind_policy(ctx: Context<BindPolicy>) -> Result<()> {
        instructions::policy::bind_policy(ctx)
    }

    pub fn record_spend(ctx: Context<RecordSpend>, amount: u128) -> Result<()> {
        instructions::policy::record_spend(ctx, amount)
    }

    pub fn log_action(
        ctx: Context<LogAction>,
        action_kind: ActionKind,
        target: Pubkey,
        value: u128,
    ) -> Result<()> {
        instructions::ledger::log_action(ctx, action_kind, target, value)
    }
}
