//! Per-device AT vocabularies.

/// AT vocabulary shared by every supported module.
pub trait Module {
    /// Human-readable module name, used in log output.
    const NAME: &'static str;

    /// Default UART baud rate after power-on.
    const BAUD_RATE: u32 = 115_200;

    /// Product serial number query.
    const IMEI_QUERY: &'static str = "AT+GSN";
}

/// Modules with a SIM and a subscriber number.
pub trait Telephony: Module {
    /// Subscriber number query.
    const SUBSCRIBER_NUMBER_QUERY: &'static str = "AT+CNUM";
}

/// Modules with the built-in `AT+HTTP*` client.
pub trait HttpService: Module {}

/// SIMCom SIM7600 LTE module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sim7600;

impl Module for Sim7600 {
    const NAME: &'static str = "SIM7600";
}

impl Telephony for Sim7600 {}

impl HttpService for Sim7600 {}

/// U100 UWB anchor module. Answers the IMEI query only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct U100;

impl Module for U100 {
    const NAME: &'static str = "U100";
}
