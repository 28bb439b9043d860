//! `pain.001.001.03`

use super::MessageBuilder;
use super::common::{self, AgentTag, BlockLayout, ExecutionDate};
use crate::Result;
use crate::context::BuildContext;
use pain_ir::{Element, Record};
use pain_schema::MessageVariant;

const LAYOUT: BlockLayout = BlockLayout {
    agent: AgentTag::Bic,
    execution_date: ExecutionDate::Date,
    block_totals: false,
    service_level: true,
    instruction_id: true,
    debtor_currency: true,
    ultimate_debtor: false,
    supplementary_data: false,
};

/// One `PmtInf` per record, agents identified by `BIC`.
///
/// `CreDtTm` is the generation time rather than the record's `date`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pain001V03;

impl MessageBuilder for Pain001V03 {
    fn variant(&self) -> MessageVariant {
        MessageVariant::V03
    }

    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element> {
        let first = common::first(records)?;
        let initiating_party = common::party(ctx, "InitgPty", first, "initiator_name")?;
        let header = common::group_header(
            ctx,
            records,
            common::generation_time(ctx),
            initiating_party,
        )?;

        common::initiation(ctx, header, &common::per_record(records), &LAYOUT)
    }
}
