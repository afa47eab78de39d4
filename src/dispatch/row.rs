//! 发货表格行（固定 32 列）
//!
//! The external fulfillment system reads the sheet by header and position,
//! so `COLUMNS` and `DispatchRow::cells` must stay in lockstep.

use chrono::NaiveDateTime;

use crate::mapping::ProductMapping;
use crate::storage::SurveySubmission;

pub const COLUMN_COUNT: usize = 32;

pub const DELIVERY_NONE: &str = "배송없음";
pub const ORDER_STATUS_NEW: &str = "발송대기/신규주문";
pub const PRODUCT_KIND_COMBINED: &str = "조합형옵션상품";
pub const PAYMENT_MOBILE: &str = "MOBILE";
pub const SALES_CHANNEL: &str = "스마트스토어";

/// How a column's value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Same fixed value on every row.
    Literal,
    /// Derived from the submission, its mapping or the build time.
    Computed,
    /// Always empty; filled in manually by fulfillment staff.
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub width: f64,
    pub kind: ColumnKind,
}

const fn col(header: &'static str, width: f64, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        header,
        width,
        kind,
    }
}

use ColumnKind::{Blank, Computed, Literal};

pub const COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    col("상품주문번호 / 주문번호", 20.0, Computed),
    col("배송방법", 10.0, Literal),
    col("택배사/송장번호", 15.0, Blank),
    col("발송일", 12.0, Computed),
    col("구매자명/ID/수취인명", 15.0, Computed),
    col("주문상태/주문세부상태", 15.0, Literal),
    col("결제위치/결제일", 20.0, Computed),
    col("상품번호/상품명", 25.0, Computed),
    col("상품종류", 15.0, Literal),
    col("옵션정보1(연락처)", 15.0, Blank),
    col("옵션정보2(이메일)", 25.0, Computed),
    col("옵션정보3(출국일)", 12.0, Blank),
    col("옵션정보4(귀국일)", 12.0, Blank),
    col("옵션정보5(개통희망일)", 15.0, Computed),
    col("옵션정보6(수령방법)", 12.0, Literal),
    col("옵션정보7(요금플랜)", 15.0, Computed),
    col("옵션정보8(이용일수)", 10.0, Computed),
    col("옵션정보9", 15.0, Blank),
    col("옵션정보10", 15.0, Blank),
    col("옵션관리코드", 25.0, Computed),
    col("수량", 8.0, Literal),
    col("가격", 10.0, Literal),
    col("할인액", 10.0, Literal),
    col("수취인연락처", 15.0, Blank),
    col("수취인주소", 30.0, Blank),
    col("우편번호", 10.0, Blank),
    col("배송메세지", 20.0, Blank),
    col("출고지", 15.0, Blank),
    col("결제수단", 10.0, Literal),
    col("개인통관고유부호", 20.0, Blank),
    col("주문일시", 20.0, Computed),
    col("판매채널", 15.0, Literal),
];

/// Headers an uploaded sheet must carry to be accepted.
pub const REQUIRED_HEADERS: [&str; 8] = [
    COLUMNS[0].header,
    COLUMNS[1].header,
    COLUMNS[3].header,
    COLUMNS[4].header,
    COLUMNS[7].header,
    COLUMNS[10].header,
    COLUMNS[13].header,
    COLUMNS[16].header,
];

pub fn headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.header)
}

/// A single spreadsheet cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

impl Cell<'_> {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

/// One fulfillment order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRow {
    pub order_number: String,
    pub delivery_method: String,
    pub courier_tracking: String,
    pub ship_date: String,
    pub buyer_name: String,
    pub order_status: String,
    pub payment_location: String,
    pub product_number: String,
    pub product_kind: String,
    pub option_contact: String,
    pub option_email: String,
    pub option_departure_date: String,
    pub option_return_date: String,
    pub option_activation_date: String,
    pub option_receive_method: String,
    pub option_plan_name: String,
    pub option_usage_days: u32,
    pub option_9: String,
    pub option_10: String,
    pub option_code: String,
    pub quantity: u32,
    pub price: u32,
    pub discount: u32,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub postal_code: String,
    pub delivery_message: String,
    pub warehouse: String,
    pub payment_method: String,
    pub customs_code: String,
    pub ordered_at: String,
    pub sales_channel: String,
}

impl DispatchRow {
    /// `{prefix}{YYYYMMDD}{seq:03}`, seq is 1-based.
    pub fn order_number(prefix: &str, now: NaiveDateTime, seq: usize) -> String {
        format!("{}{}{:03}", prefix, now.format("%Y%m%d"), seq)
    }

    pub fn from_submission(
        order_number: String,
        submission: &SurveySubmission,
        mapping: Option<&ProductMapping>,
        now: NaiveDateTime,
    ) -> Self {
        let today = now.format("%Y-%m-%d").to_string();
        let product_code = mapping
            .map(|m| m.seller_product_code.clone())
            .unwrap_or_default();

        Self {
            order_number,
            delivery_method: DELIVERY_NONE.to_string(),
            courier_tracking: String::new(),
            ship_date: today.clone(),
            buyer_name: submission.name.clone(),
            order_status: ORDER_STATUS_NEW.to_string(),
            payment_location: format!("{} / {}", PAYMENT_MOBILE, today),
            product_number: product_code.clone(),
            product_kind: PRODUCT_KIND_COMBINED.to_string(),
            option_contact: String::new(),
            option_email: submission.influencer_email.clone(),
            option_departure_date: String::new(),
            option_return_date: String::new(),
            option_activation_date: submission.desired_start_date.format("%Y-%m-%d").to_string(),
            option_receive_method: DELIVERY_NONE.to_string(),
            option_plan_name: mapping.map(|m| m.plan_name.clone()).unwrap_or_default(),
            option_usage_days: submission.days,
            option_9: String::new(),
            option_10: String::new(),
            option_code: product_code,
            quantity: 1,
            price: 0,
            discount: 0,
            recipient_phone: String::new(),
            recipient_address: String::new(),
            postal_code: String::new(),
            delivery_message: String::new(),
            warehouse: String::new(),
            payment_method: PAYMENT_MOBILE.to_string(),
            customs_code: String::new(),
            ordered_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            sales_channel: SALES_CHANNEL.to_string(),
        }
    }

    /// Cells in `COLUMNS` order.
    pub fn cells(&self) -> [Cell<'_>; COLUMN_COUNT] {
        use Cell::{Number, Text};
        [
            Text(&self.order_number),
            Text(&self.delivery_method),
            Text(&self.courier_tracking),
            Text(&self.ship_date),
            Text(&self.buyer_name),
            Text(&self.order_status),
            Text(&self.payment_location),
            Text(&self.product_number),
            Text(&self.product_kind),
            Text(&self.option_contact),
            Text(&self.option_email),
            Text(&self.option_departure_date),
            Text(&self.option_return_date),
            Text(&self.option_activation_date),
            Text(&self.option_receive_method),
            Text(&self.option_plan_name),
            Number(f64::from(self.option_usage_days)),
            Text(&self.option_9),
            Text(&self.option_10),
            Text(&self.option_code),
            Number(f64::from(self.quantity)),
            Number(f64::from(self.price)),
            Number(f64::from(self.discount)),
            Text(&self.recipient_phone),
            Text(&self.recipient_address),
            Text(&self.postal_code),
            Text(&self.delivery_message),
            Text(&self.warehouse),
            Text(&self.payment_method),
            Text(&self.customs_code),
            Text(&self.ordered_at),
            Text(&self.sales_channel),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_headers_are_unique() {
        let mut all: Vec<&str> = headers().collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), COLUMN_COUNT);
    }

    #[test]
    fn test_order_number_format() {
        assert_eq!(DispatchRow::order_number("RV", now(), 1), "RV20240115001");
        assert_eq!(DispatchRow::order_number("RV", now(), 42), "RV20240115042");
    }

    #[test]
    fn test_blank_columns_are_empty_and_literals_fixed() {
        let submission = SurveySubmission::sample();
        let row = DispatchRow::from_submission("RV1".into(), &submission, None, now());
        for (column, cell) in COLUMNS.iter().zip(row.cells()) {
            match column.kind {
                ColumnKind::Blank => assert!(cell.is_blank(), "{} must be blank", column.header),
                ColumnKind::Literal => assert!(!cell.is_blank(), "{} is a literal", column.header),
                ColumnKind::Computed => {}
            }
        }
        assert_eq!(row.payment_location, "MOBILE / 2024-01-15");
        assert_eq!(row.ordered_at, "2024-01-15 09:00:00");
        // no mapping → blank product cells
        assert!(row.product_number.is_empty());
        assert!(row.option_plan_name.is_empty());
    }
}
