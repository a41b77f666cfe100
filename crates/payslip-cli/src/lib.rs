//! Library components of the payslip command-line tool.

#![deny(unsafe_code)]

pub mod logging;
