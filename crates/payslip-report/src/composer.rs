//! Payslip composer.
//!
//! A payslip is a pure function of the row, the variant's mappings and the
//! header settings. Layout per variant:
//!
//! ```text
//! <organization, centered>
//! PAY SLIP FOR THE MONTH OF <month>, centered
//! <identity block, five lines>
//!
//! EARNINGS                                DEDUCTIONS
//!
//! <two-column body>
//!
//! <totals footer>
//! ```

use tracing::debug;

use payslip_map::{MappingStore, VariantMappings};
use payslip_model::{Category, EmployeeRow, PayslipSettings, Variant};

use crate::error::{PayslipError, Result};
use crate::fields::{amount_field, date_field, identifier_field, optional_integer, text_field};
use crate::format::{format_amount, format_lines};
use crate::layout::combine;

/// Width the two header lines are centered in.
const HEADER_WIDTH: usize = 80;

/// Row columns read by the identity block and footer.
pub mod columns {
    pub const EMP_NO: &str = "EMP NO";
    pub const NIC_NO: &str = "NIC No.";
    pub const NAME: &str = "NAME";
    pub const DEPARTMENT: &str = "DEPARTMENT";
    pub const DESIGNATION: &str = "DESIGNATION";
    pub const DOB: &str = "DOB";
    pub const DOJ: &str = "DOJ";
    pub const EPF_NO: &str = "EPF NO";
    pub const BASIC_SALARY: &str = "BASIC SAL";
    pub const TOTAL_EARNINGS: &str = "TOT EARN";
    pub const TOTAL_DEDUCTIONS: &str = "TOT DED";
    pub const TOTAL_DEDUCTIONS_FTC: &str = "total deduction";
    pub const EPF_EMPLOYEE: &str = "EPF YEE";
    pub const ETF_EMPLOYER: &str = "ETF YER";
    pub const EPF_EMPLOYER: &str = "EPF YER";
    pub const TOTAL_EPF: &str = "TOTAL EPF";
    pub const NET_PAY: &str = "NETPAY";
    pub const BANK: &str = "BANK";
    pub const BANK_CODE: &str = "BANK CODE";
    pub const BRANCH_NAME: &str = "BRANCH NAME";
    pub const BRANCH: &str = "BRANCH";
    pub const ACCOUNT_NO: &str = "A/C NO";
}

/// Fixed geometry of one variant.
struct VariantLayout {
    /// Label, left value and right label widths of the identity block.
    identity: [usize; 3],
    /// Gap between the body's two columns.
    spacer: usize,
    deductions_title: &'static str,
}

const FIXED_LAYOUT: VariantLayout = VariantLayout {
    identity: [12, 23, 14],
    spacer: 3,
    deductions_title: "DEDUCTIONS",
};

const FTC_LAYOUT: VariantLayout = VariantLayout {
    identity: [15, 24, 16],
    spacer: 4,
    deductions_title: " DEDUCTIONS",
};

impl VariantLayout {
    fn of(variant: Variant) -> &'static Self {
        match variant {
            Variant::Fixed => &FIXED_LAYOUT,
            Variant::Ftc => &FTC_LAYOUT,
        }
    }

    fn identity_line(&self, left: (&str, &str), right: (&str, &str)) -> String {
        let [lw, vw, rw] = self.identity;
        format!(
            "{:<lw$}  {:<vw$}{:<rw$}  {}",
            left.0, left.1, right.0, right.1
        )
    }

    fn identity_block(&self, variant: Variant, row: &EmployeeRow) -> Result<Vec<String>> {
        use columns::{DEPARTMENT, DESIGNATION, DOB, DOJ, EMP_NO, EPF_NO, NAME, NIC_NO};

        let emp_no = identifier_field(row, EMP_NO)?;
        let sap_no = format!("WF{emp_no}");
        let last = match variant {
            Variant::Fixed => self.identity_line(("", ""), ("SAP NO", &sap_no)),
            Variant::Ftc => {
                let rate = optional_integer(row, columns::BASIC_SALARY);
                self.identity_line(("RATE", &rate), ("SAP NO", &sap_no))
            }
        };
        Ok(vec![
            self.identity_line(("EMP NO", &emp_no), ("NIC NO", &text_field(row, NIC_NO)?)),
            self.identity_line(
                ("NAME", &text_field(row, NAME)?),
                ("DEPARTMENT", &text_field(row, DEPARTMENT)?),
            ),
            self.identity_line(
                ("DESIGNATION", &text_field(row, DESIGNATION)?),
                ("D.O.B", &date_field(row, DOB)?),
            ),
            self.identity_line(
                ("D.O.J", &date_field(row, DOJ)?),
                ("E.P.F.NO", &identifier_field(row, EPF_NO)?),
            ),
            last,
        ])
    }

    fn titles(&self) -> String {
        let half = HEADER_WIDTH / 2;
        format!("{:<half$}{:<half$}", "EARNINGS", self.deductions_title)
    }
}

fn header(settings: &PayslipSettings) -> String {
    let title = format!("PAY SLIP FOR THE MONTH OF {}", settings.month);
    format!(
        "{:^width$}\n{:^width$}\n",
        settings.organization,
        title,
        width = HEADER_WIDTH
    )
}

fn amount(row: &EmployeeRow, column: &str) -> Result<String> {
    amount_field(row, column).map(format_amount)
}

fn fixed_footer(row: &EmployeeRow) -> Result<Vec<String>> {
    use columns::{
        ACCOUNT_NO, BANK, BRANCH_NAME, EPF_EMPLOYEE, EPF_EMPLOYER, ETF_EMPLOYER, NET_PAY,
        TOTAL_DEDUCTIONS, TOTAL_EARNINGS, TOTAL_EPF,
    };

    let net_pay = amount(row, NET_PAY)?;
    Ok(vec![
        format!(
            "{:<18}  {:>12}       {:<18}  {:>8}",
            "TOT EARNINGS",
            amount(row, TOTAL_EARNINGS)?,
            " TOT DEDUCTIONS",
            amount(row, TOTAL_DEDUCTIONS)?
        ),
        String::new(),
        format!(
            "{:<18}  {:>12}       {:<16}  {:>10}",
            "EPF YEE 8%",
            amount(row, EPF_EMPLOYEE)?,
            " NET PAY",
            net_pay
        ),
        format!(
            "{:<18}  {:>12}       {:<16}  {:>10}",
            "ETF YER 3%",
            amount(row, ETF_EMPLOYER)?,
            " BANK PAYMENT",
            net_pay
        ),
        format!("{:<18}  {:>12}", "EPF YER 12%", amount(row, EPF_EMPLOYER)?),
        format!("{:<18}  {:>12}", "TOTAL EPF", amount(row, TOTAL_EPF)?),
        String::new(),
        format!(
            "{:<10}  {}   {}       {:<12}  {}",
            "BANK",
            text_field(row, BANK)?,
            text_field(row, BRANCH_NAME)?,
            "A/C NO",
            identifier_field(row, ACCOUNT_NO)?
        ),
    ])
}

fn ftc_footer(row: &EmployeeRow) -> Result<Vec<String>> {
    use columns::{
        ACCOUNT_NO, BANK_CODE, BRANCH, EPF_EMPLOYEE, EPF_EMPLOYER, ETF_EMPLOYER, NET_PAY,
        TOTAL_DEDUCTIONS_FTC, TOTAL_EARNINGS, TOTAL_EPF,
    };

    let net_pay = amount(row, NET_PAY)?;
    Ok(vec![
        format!(
            "{:<18}  {:>12}         {:<15}  {:>10}",
            "TOT EARNINGS",
            amount(row, TOTAL_EARNINGS)?,
            "TOT DEDUCTIONS",
            amount(row, TOTAL_DEDUCTIONS_FTC)?
        ),
        String::new(),
        format!(
            "{:<18}  {:>12}         {:<15}  {:>10}",
            "EPF YEE 8%",
            amount(row, EPF_EMPLOYEE)?,
            "NET PAY",
            net_pay
        ),
        format!(
            "{:<18}  {:>12}         {:<15}  {:>10}",
            "ETF YER 3%",
            amount(row, ETF_EMPLOYER)?,
            "BANK PAYMENT",
            net_pay
        ),
        format!("{:<18}  {:>12}", "EPF YER 12%", amount(row, EPF_EMPLOYER)?),
        format!("{:<18}  {:>12}", "TOTAL EPF", amount(row, TOTAL_EPF)?),
        String::new(),
        format!(
            "{:<10}  {:<15}  {:<10}  {:<12}  {:<15}",
            "BANK",
            text_field(row, BANK_CODE)?,
            text_field(row, BRANCH)?,
            "A/C NO",
            identifier_field(row, ACCOUNT_NO)?
        ),
    ])
}

/// Routes a sheet name to its layout; anything but FIXED/FTC is fatal.
pub fn resolve_variant(sheet_name: &str) -> Result<Variant> {
    Variant::from_sheet_name(sheet_name).map_err(|_| PayslipError::UnsupportedVariant {
        name: sheet_name.to_string(),
    })
}

/// Builds one payslip for a known variant.
pub fn compose(
    row: &EmployeeRow,
    variant: Variant,
    mappings: &VariantMappings,
    settings: &PayslipSettings,
) -> Result<String> {
    let layout = VariantLayout::of(variant);
    let identity = layout.identity_block(variant, row)?;
    let footer = match variant {
        Variant::Fixed => fixed_footer(row)?,
        Variant::Ftc => ftc_footer(row)?,
    };

    let earnings = format_lines(row, Category::Earnings, &mappings.earnings);
    let deductions = format_lines(row, Category::Deductions, &mappings.deductions);
    let body = combine(&earnings, &deductions, layout.spacer);
    debug!(
        %variant,
        earnings = earnings.len(),
        deductions = deductions.len(),
        "composed payslip"
    );

    let mut document = header(settings);
    document.push_str(&identity.join("\n"));
    document.push_str("\n\n");
    document.push_str(&layout.titles());
    document.push_str("\n\n");
    document.push_str(&body.join("\n"));
    document.push_str("\n\n");
    document.push_str(&footer.join("\n"));
    Ok(document)
}

/// Composes payslips from a snapshot of the mapping configuration.
///
/// The composer owns its mappings and settings, so it can be shared across
/// threads and the store may change afterwards without affecting it.
#[derive(Debug, Clone)]
pub struct PayslipComposer {
    settings: PayslipSettings,
    fixed: VariantMappings,
    ftc: VariantMappings,
}

impl PayslipComposer {
    pub fn new(store: &MappingStore, settings: PayslipSettings) -> Self {
        Self {
            settings,
            fixed: store.get_mappings(Variant::Fixed.as_str()),
            ftc: store.get_mappings(Variant::Ftc.as_str()),
        }
    }

    /// Uses the store's own organization and month.
    pub fn from_store(store: &MappingStore) -> Self {
        Self::new(store, store.settings())
    }

    pub fn settings(&self) -> &PayslipSettings {
        &self.settings
    }

    pub fn mappings(&self, variant: Variant) -> &VariantMappings {
        match variant {
            Variant::Fixed => &self.fixed,
            Variant::Ftc => &self.ftc,
        }
    }

    /// Generates the payslip text for one row of the named sheet.
    pub fn generate(&self, row: &EmployeeRow, sheet_name: &str) -> Result<String> {
        let variant = resolve_variant(sheet_name)?;
        compose(row, variant, self.mappings(variant), &self.settings)
    }
}

/// One-shot form of [`PayslipComposer::generate`].
pub fn generate_payslip(
    row: &EmployeeRow,
    sheet_name: &str,
    store: &MappingStore,
    settings: &PayslipSettings,
) -> Result<String> {
    let variant = resolve_variant(sheet_name)?;
    compose(row, variant, &store.get_mappings(variant.as_str()), settings)
}
