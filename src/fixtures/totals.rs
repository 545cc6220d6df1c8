use crate::fixtures::model::LineItem;

/// 报价单 / 发票的金额汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

/// 金额统一保留两位小数
pub fn round_money(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn line_total(quantity: u32, unit_price: f64) -> f64 {
    round_money(quantity as f64 * unit_price)
}

/// subtotal = Σ qty × price；税基 = subtotal - discount；tax = 税基 × rate%
pub fn compute_totals(items: &[LineItem], tax_rate: f64, discount_amount: f64) -> DocumentTotals {
    let subtotal = round_money(
        items
            .iter()
            .map(|i| i.quantity as f64 * i.unit_price)
            .sum::<f64>(),
    );
    let discount_amount = round_money(discount_amount.clamp(0.0, subtotal));
    let taxable = subtotal - discount_amount;
    let tax_amount = round_money(taxable * tax_rate / 100.0);
    DocumentTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total_amount: round_money(taxable + tax_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_price: f64) -> LineItem {
        LineItem {
            product_id: "PRD-0001".to_string(),
            description: "test".to_string(),
            quantity,
            unit_price,
            total: line_total(quantity, unit_price),
        }
    }

    #[test]
    fn test_invoice_example() {
        let t = compute_totals(&[item(2, 100.0)], 8.0, 0.0);
        assert_eq!(t.subtotal, 200.0);
        assert_eq!(t.tax_amount, 16.0);
        assert_eq!(t.total_amount, 216.0);
    }

    #[test]
    fn test_discount_reduces_tax_base() {
        let t = compute_totals(&[item(1, 500.0), item(3, 50.0)], 10.0, 50.0);
        assert_eq!(t.subtotal, 650.0);
        assert_eq!(t.discount_amount, 50.0);
        assert_eq!(t.tax_amount, 60.0);
        assert_eq!(t.total_amount, 660.0);
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let t = compute_totals(&[item(1, 20.0)], 8.0, 100.0);
        assert_eq!(t.discount_amount, 20.0);
        assert_eq!(t.total_amount, 0.0);
    }

    #[test]
    fn test_empty_items() {
        let t = compute_totals(&[], 8.0, 0.0);
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.total_amount, 0.0);
    }
}
