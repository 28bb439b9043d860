//! Element fragments shared by the variant builders

use crate::context::BuildContext;
use crate::{Error, Result};
use pain_ir::{Element, Record};
use pain_validation::{parse_boolean, parse_decimal, parse_timestamp};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// `CreDtTm` rendering
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tag carrying the BIC inside `FinInstnId`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgentTag {
    Bic,
    Bicfi,
}

impl AgentTag {
    fn as_str(self) -> &'static str {
        match self {
            Self::Bic => "BIC",
            Self::Bicfi => "BICFI",
        }
    }
}

/// Shape of `ReqdExctnDt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionDate {
    /// `<ReqdExctnDt>2024-01-02</ReqdExctnDt>`
    Date,
    /// `<ReqdExctnDt><Dt>2024-01-02</Dt></ReqdExctnDt>`
    DateChoice,
}

/// Per-variant switches for the payment information block
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct BlockLayout {
    pub agent: AgentTag,
    pub execution_date: ExecutionDate,
    /// `NbOfTxs` and `CtrlSum` inside `PmtInf`
    pub block_totals: bool,
    pub service_level: bool,
    /// `PmtId/InstrId` next to `EndToEndId`
    pub instruction_id: bool,
    /// `DbtrAcct/Ccy`
    pub debtor_currency: bool,
    pub ultimate_debtor: bool,
    /// `CdtTrfTxInf/SplmtryData`
    pub supplementary_data: bool,
}

pub(crate) fn first(records: &[Record]) -> Result<&Record> {
    records.first().ok_or(Error::NoRecords)
}

/// `CreDtTm` taken from the record's `date` column
pub(crate) fn creation_time(ctx: &BuildContext, record: &Record) -> Result<String> {
    let raw = ctx.field(record, "date")?;
    parse_timestamp(raw)
        .map(|ts| ts.format(DATE_TIME_FORMAT).to_string())
        .ok_or_else(|| Error::invalid_value(record.row, "date", raw))
}

/// `CreDtTm` taken from the generation clock
pub(crate) fn generation_time(ctx: &BuildContext) -> String {
    ctx.created_at.format(DATE_TIME_FORMAT).to_string()
}

fn amount(ctx: &BuildContext, record: &Record) -> Result<Decimal> {
    let raw = ctx.field(record, "payment_amount")?;
    parse_decimal(raw).ok_or_else(|| Error::invalid_value(record.row, "payment_amount", raw))
}

/// Sum of `payment_amount`, rounded to two decimal places
pub(crate) fn control_sum<'r>(
    ctx: &BuildContext,
    records: impl IntoIterator<Item = &'r Record>,
) -> Result<String> {
    let mut total = Decimal::ZERO;
    for record in records {
        total += amount(ctx, record)?;
    }
    Ok(format!("{:.2}", total.round_dp(2)))
}

/// `<name><Nm>..</Nm></name>`
pub(crate) fn party(
    ctx: &BuildContext,
    name: &str,
    record: &Record,
    field: &str,
) -> Result<Element> {
    Ok(Element::new(name).with_child(Element::leaf("Nm", ctx.field(record, field)?)))
}

/// `<name><FinInstnId><BIC|BICFI>..</..></FinInstnId></name>`
pub(crate) fn agent(
    ctx: &BuildContext,
    name: &str,
    tag: AgentTag,
    record: &Record,
    field: &str,
) -> Result<Element> {
    let bic = Element::leaf(tag.as_str(), ctx.field(record, field)?);
    let institution = Element::new("FinInstnId").with_child(bic);
    Ok(Element::new(name).with_child(institution))
}

/// `<name><Id><IBAN>..</IBAN></Id>[<Ccy>..</Ccy>]</name>`
pub(crate) fn account(
    ctx: &BuildContext,
    name: &str,
    record: &Record,
    field: &str,
    currency: Option<&str>,
) -> Result<Element> {
    let iban = Element::leaf("IBAN", ctx.field(record, field)?);
    let mut account = Element::new(name).with_child(Element::new("Id").with_child(iban));
    if let Some(currency) = currency {
        account.append_leaf("Ccy", currency);
    }
    Ok(account)
}

/// `GrpHdr/FwdgAgt`
pub(crate) fn forwarding_agent(ctx: &BuildContext, record: &Record) -> Result<Element> {
    agent(ctx, "FwdgAgt", AgentTag::Bicfi, record, "forwarding_agent_BIC")
}

/// Group header up to and including the initiating party.
///
/// `NbOfTxs` repeats the declared `nb_of_txs` of the first record; the
/// control sum covers every record.
pub(crate) fn group_header(
    ctx: &BuildContext,
    records: &[Record],
    created: String,
    initiating_party: Element,
) -> Result<Element> {
    let first = first(records)?;
    let declared = ctx.field(first, "nb_of_txs")?;
    let count: u64 = declared
        .parse()
        .map_err(|_| Error::invalid_value(first.row, "nb_of_txs", declared))?;

    let mut header = Element::new("GrpHdr");
    header
        .append_leaf("MsgId", ctx.field(first, "id")?)
        .append_leaf("CreDtTm", created)
        .append_leaf("NbOfTxs", count.to_string())
        .append_leaf("CtrlSum", control_sum(ctx, records)?);
    header.append(initiating_party);
    Ok(header)
}

/// One block per record, in input order
pub(crate) fn per_record(records: &[Record]) -> Vec<Vec<&Record>> {
    records.iter().map(|r| vec![r]).collect()
}

/// Blocks keyed by `payment_information_id`, in order of first appearance
pub(crate) fn by_payment_information<'r>(
    ctx: &BuildContext,
    records: &'r [Record],
) -> Result<Vec<Vec<&'r Record>>> {
    let mut blocks: Vec<Vec<&Record>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let key = ctx.field(record, "payment_information_id")?;
        match index.get(key) {
            Some(&i) => blocks[i].push(record),
            None => {
                index.insert(key, blocks.len());
                blocks.push(vec![record]);
            }
        }
    }
    Ok(blocks)
}

fn execution_date(ctx: &BuildContext, record: &Record, style: ExecutionDate) -> Result<Element> {
    let raw = ctx.field(record, "requested_execution_date")?;
    let date = parse_timestamp(raw)
        .map(|ts| ts.date().format(DATE_FORMAT).to_string())
        .ok_or_else(|| Error::invalid_value(record.row, "requested_execution_date", raw))?;

    Ok(match style {
        ExecutionDate::Date => Element::leaf("ReqdExctnDt", date),
        ExecutionDate::DateChoice => {
            Element::new("ReqdExctnDt").with_child(Element::leaf("Dt", date))
        }
    })
}

fn batch_booking(ctx: &BuildContext, record: &Record) -> Result<&'static str> {
    let raw = ctx.field(record, "batch_booking")?;
    match parse_boolean(raw) {
        Some(true) => Ok("true"),
        Some(false) => Ok("false"),
        None => Err(Error::invalid_value(record.row, "batch_booking", raw)),
    }
}

/// `PmtInf` for one block; block-level values come from its first record
pub(crate) fn payment_information(
    ctx: &BuildContext,
    block: &[&Record],
    layout: &BlockLayout,
) -> Result<Element> {
    let Some(&head) = block.first() else {
        return Err(Error::NoRecords);
    };

    let mut info = Element::new("PmtInf");
    info.append_leaf("PmtInfId", ctx.field(head, "payment_information_id")?)
        .append_leaf("PmtMtd", ctx.field(head, "payment_method")?)
        .append_leaf("BtchBookg", batch_booking(ctx, head)?);

    if layout.block_totals {
        info.append_leaf("NbOfTxs", block.len().to_string())
            .append_leaf("CtrlSum", control_sum(ctx, block.iter().copied())?);
    }

    if layout.service_level {
        let code = Element::leaf("Cd", ctx.field(head, "service_level_code")?);
        let service_level = Element::new("SvcLvl").with_child(code);
        info.append(Element::new("PmtTpInf").with_child(service_level));
    }

    info.append(execution_date(ctx, head, layout.execution_date)?);
    info.append(party(ctx, "Dbtr", head, "debtor_name")?);

    let currency = if layout.debtor_currency {
        Some(ctx.field(head, "currency")?)
    } else {
        None
    };
    info.append(account(ctx, "DbtrAcct", head, "debtor_account_IBAN", currency)?);
    info.append(agent(ctx, "DbtrAgt", layout.agent, head, "debtor_agent_BIC")?);

    if layout.ultimate_debtor {
        info.append(party(ctx, "UltmtDbtr", head, "ultimate_debtor_name")?);
    }
    info.append_leaf("ChrgBr", ctx.field(head, "charge_bearer")?);

    for record in block {
        info.append(credit_transfer(ctx, record, layout)?);
    }
    Ok(info)
}

/// `CdtTrfTxInf` for a single record
pub(crate) fn credit_transfer(
    ctx: &BuildContext,
    record: &Record,
    layout: &BlockLayout,
) -> Result<Element> {
    let payment_id = ctx.field(record, "payment_id")?;
    let mut identification = Element::new("PmtId");
    if layout.instruction_id {
        identification.append_leaf("InstrId", payment_id);
    }
    identification.append_leaf("EndToEndId", payment_id);

    let instructed = Element::leaf("InstdAmt", amount(ctx, record)?.to_string())
        .with_attribute("Ccy", ctx.field(record, "currency")?);

    let mut transaction = Element::new("CdtTrfTxInf");
    transaction.append(identification);
    transaction.append(Element::new("Amt").with_child(instructed));
    transaction.append(agent(ctx, "CdtrAgt", layout.agent, record, "creditor_agent_BIC")?);
    transaction.append(party(ctx, "Cdtr", record, "creditor_name")?);
    transaction.append(account(ctx, "CdtrAcct", record, "creditor_account_IBAN", None)?);
    let unstructured = Element::leaf("Ustrd", ctx.field(record, "remittance_information")?);
    transaction.append(Element::new("RmtInf").with_child(unstructured));

    if layout.supplementary_data {
        let note = Element::leaf("Nt", ctx.field(record, "supplementary_data")?);
        let envelope = Element::new("Envlp").with_child(note);
        transaction.append(Element::new("SplmtryData").with_child(envelope));
    }
    Ok(transaction)
}

/// `CstmrCdtTrfInitn` from a finished header and the payment blocks
pub(crate) fn initiation(
    ctx: &BuildContext,
    header: Element,
    blocks: &[Vec<&Record>],
    layout: &BlockLayout,
) -> Result<Element> {
    let mut body = Element::new("CstmrCdtTrfInitn").with_child(header);
    for block in blocks {
        body.append(payment_information(ctx, block, layout)?);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pain_schema::{FieldSchemaLoader, MessageVariant};

    fn ctx() -> BuildContext {
        let schema = FieldSchemaLoader::new()
            .load_variant(MessageVariant::V10)
            .unwrap();
        BuildContext::new(MessageVariant::V10, schema)
    }

    fn record(row: usize, block: &str, amount: &str) -> Record {
        Record::from_pairs(
            row,
            [
                ("payment_information_id", block),
                ("payment_amount", amount),
                ("date", "2024-03-01 09:30:00"),
                ("requested_execution_date", "2024-03-04T00:00:00Z"),
                ("batch_booking", "True"),
            ],
        )
    }

    #[test]
    fn test_control_sum_rounds_to_cents() {
        let records = [record(1, "A", "10.005"), record(2, "A", "1e1"), record(3, "A", "0.1")];
        assert_eq!(control_sum(&ctx(), &records).unwrap(), "20.10");
    }

    #[test]
    fn test_control_sum_rejects_garbage() {
        let records = [record(4, "A", "ten")];
        let err = control_sum(&ctx(), &records).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 4, .. }));
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let ctx = ctx();
        let records = [record(1, "B", "1"), record(2, "A", "1"), record(3, "B", "1")];
        let blocks = by_payment_information(&ctx, &records).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].iter().map(|r| r.row).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(blocks[1][0].row, 2);
        assert_eq!(per_record(&records).len(), 3);
    }

    #[test]
    fn test_timestamps_are_normalized() {
        let ctx = ctx();
        let r = record(1, "A", "1");
        assert_eq!(creation_time(&ctx, &r).unwrap(), "2024-03-01T09:30:00");

        let date = execution_date(&ctx, &r, ExecutionDate::DateChoice).unwrap();
        assert_eq!(date.find_child("Dt").and_then(Element::text), Some("2024-03-04"));
        assert_eq!(batch_booking(&ctx, &r).unwrap(), "true");
    }

    #[test]
    fn test_account_with_currency() {
        let ctx = ctx();
        let r = Record::from_pairs(1, [("debtor_account_IBAN", "DE89370400440532013000")]);
        let account = account(&ctx, "DbtrAcct", &r, "debtor_account_IBAN", Some("EUR")).unwrap();

        assert_eq!(account.children.len(), 2);
        assert_eq!(account.find_child("Ccy").and_then(Element::text), Some("EUR"));
    }
}
