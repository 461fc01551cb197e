use chrono::NaiveDate;

use crate::{period::PayPeriod, product::Product};

pub const TOTAL_LABEL: &str = "total";
const HEADER: [&str; 3] = ["name", "sum", "payment day"];
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseReportRow {
    pub name: String,
    /// Wide enough to total any number of `i64` sums
    pub sum: i128,
    /// Empty for the total row
    pub payment_day: Option<u32>,
}

/// Products due in one pay period, ordered by due date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseReport {
    pub rows: Vec<ExpenseReportRow>,
    pub total: ExpenseReportRow,
}

impl ExpenseReport {
    pub fn build(period: &PayPeriod, products: &[Product]) -> Self {
        let mut due: Vec<(NaiveDate, &Product)> = products
            .iter()
            .filter_map(|product| {
                period
                    .occurrence_of(product.payment_day)
                    .map(|date| (date, product))
            })
            .collect();
        due.sort_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then_with(|| a.name.cmp(&b.name)));

        let rows: Vec<ExpenseReportRow> = due
            .into_iter()
            .map(|(_, product)| ExpenseReportRow {
                name: product.name.clone(),
                sum: i128::from(product.sum),
                payment_day: Some(product.payment_day),
            })
            .collect();

        let total = ExpenseReportRow {
            name: TOTAL_LABEL.to_string(),
            sum: rows.iter().map(|row| row.sum).sum(),
            payment_day: None,
        };

        ExpenseReport { rows, total }
    }

    /// Render as a fixed-width table: header, rows, and a total footer
    pub fn render(&self) -> String {
        let cells = |row: &ExpenseReportRow| -> [String; 3] {
            [
                row.name.clone(),
                row.sum.to_string(),
                row.payment_day.map(|day| day.to_string()).unwrap_or_default(),
            ]
        };

        let body: Vec<[String; 3]> = self.rows.iter().map(cells).collect();
        let footer = cells(&self.total);
        let header = HEADER.map(str::to_string);

        let mut widths = [0usize; 3];
        for line in std::iter::once(&header)
            .chain(body.iter())
            .chain(std::iter::once(&footer))
        {
            for (width, cell) in widths.iter_mut().zip(line.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let separator = widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);

        let mut lines = Vec::with_capacity(body.len() + 4);
        lines.push(format_line(&header, &widths, false));
        lines.push(separator.clone());
        for row in &body {
            lines.push(format_line(row, &widths, true));
        }
        lines.push(separator);
        lines.push(format_line(&footer, &widths, true));

        lines.join("\n")
    }
}

/// Name is left-aligned, numbers right-aligned when `align_numbers` is set
fn format_line(cells: &[String; 3], widths: &[usize; 3], align_numbers: bool) -> String {
    let line = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(column, (cell, &width))| {
            let padding = " ".repeat(width - cell.chars().count());
            if column > 0 && align_numbers {
                format!("{padding}{cell}")
            } else {
                format!("{cell}{padding}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}
