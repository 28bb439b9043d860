//! `pain.001.001.09`

use super::MessageBuilder;
use super::common::{self, AgentTag, BlockLayout, ExecutionDate};
use crate::Result;
use crate::context::BuildContext;
use pain_ir::{Element, Record};
use pain_schema::MessageVariant;

const LAYOUT: BlockLayout = BlockLayout {
    agent: AgentTag::Bicfi,
    execution_date: ExecutionDate::DateChoice,
    block_totals: false,
    service_level: false,
    instruction_id: false,
    debtor_currency: false,
    ultimate_debtor: false,
    supplementary_data: true,
};

/// One `PmtInf` per record; every transaction carries its
/// `supplementary_data` in an envelope
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V09;

impl MessageBuilder for Pain001V09 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V09
    }

    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element> {
        let first = common::first(records)?;
        let initiating_party = common::party(ctx, "InitgPty", first, "initiator_name")?;
        let created = common::creation_time(ctx, first)?;
        let header = common::group_header(ctx, records, created, initiating_party)?;

        common::initiation(ctx, header, &common::per_record(records), &LAYOUT)
    }
}
