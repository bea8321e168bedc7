mod common;

use common::{MockClock, MockModem};
use libmodem::at::CommandOutcome;
use libmodem::modem::{HttpService, Module, Telephony};
use libmodem::{Config, Error, Modem, Sim7600, U100};

#[test]
fn test_sim7600_identity() {
    let serial = MockModem::new()
        .on("AT+GSN", "AT+GSN\r\r\n861234567890123\r\n\r\nOK\r\n")
        .on("AT+CNUM", "AT+CNUM\r\r\n+CNUM: \"Name\",\"+15551234567\",129\r\n\r\nOK\r\n");
    let mut modem: Modem<Sim7600, _, _> = Modem::new(serial, MockClock::new());

    assert_eq!(modem.imei().unwrap().as_str(), "861234567890123");
    assert_eq!(modem.phone_number().unwrap().as_str(), "+15551234567");
}

#[test]
fn test_phone_number_absent() {
    let serial = MockModem::new().on("AT+CNUM", "\r\nOK\r\n");
    let mut modem: Modem<Sim7600, _, _> = Modem::new(serial, MockClock::new());

    assert_eq!(modem.phone_number(), Err(Error::MalformedField));
}

#[test]
fn test_identity_window_bounds_the_query() {
    let config = Config {
        identity_window_ms: 250,
        ..Config::default()
    };
    let mut modem: Modem<U100, _, _> = Modem::with_config(MockModem::new(), MockClock::new(), config);

    assert_eq!(modem.imei(), Err(Error::MalformedField));
    assert_eq!(modem.client().serial().count("AT+GSN"), 1);

    let (_, clock) = modem.release();
    assert!(clock.millis() >= 250);
    assert!(clock.millis() < 1000);
}

#[test]
fn test_u100_imei() {
    let serial = MockModem::new().on("AT+GSN", "\r\n356938035643809\r\n\r\nOK\r\n");
    let mut modem: Modem<U100, _, _> = Modem::new(serial, MockClock::new());

    assert_eq!(modem.imei().unwrap().as_str(), "356938035643809");
}

#[test]
fn test_u100_alphanumeric_serial() {
    let serial = MockModem::new().on("AT+GSN", "AT+GSN\r\r\nU100-0A7F3C21\r\n\r\nOK\r\n");
    let mut modem: Modem<U100, _, _> = Modem::new(serial, MockClock::new());

    assert_eq!(modem.imei().unwrap().as_str(), "U100-0A7F3C21");
}

#[test]
fn test_send_command_passthrough() {
    let serial = MockModem::new().on("AT+CSQ", "\r\n+CSQ: 20,99\r\n\r\nOK\r\n");
    let mut modem: Modem<Sim7600, _, _> = Modem::new(serial, MockClock::new());

    assert_eq!(modem.send_command("AT+CSQ", 500, 3), CommandOutcome::Success);
    assert_eq!(modem.client().response().find_line("+CSQ:"), Some("+CSQ: 20,99"));
    assert_eq!(modem.send_command("AT+CFUN?", 100, 2), CommandOutcome::Failure);
}

#[test]
fn test_module_vocabulary() {
    fn http<M: HttpService>() -> &'static str {
        M::NAME
    }

    assert_eq!(Sim7600::BAUD_RATE, 115_200);
    assert_eq!(U100::BAUD_RATE, 115_200);
    assert_eq!(Sim7600::IMEI_QUERY, "AT+GSN");
    assert_eq!(U100::IMEI_QUERY, "AT+GSN");
    assert_eq!(Sim7600::SUBSCRIBER_NUMBER_QUERY, "AT+CNUM");
    assert_eq!(http::<Sim7600>(), "SIM7600");
    assert_eq!(U100::NAME, "U100");
}
