use std::{borrow::Cow, sync::OnceLock};

use anyhow::{Result, bail};
use regex::Regex;

/// Canonical interface type, its short form, and the lowercase spellings parsers emit.
type InterfaceType = (&'static str, &'static str, &'static [&'static str]);

const INTERFACE_TYPES: &[InterfaceType] = &[
    (
        "GigabitEthernet",
        "Gi",
        &["gi", "gig", "gige", "gigabit", "gigabitethernet"],
    ),
    (
        "TenGigabitEthernet",
        "Te",
        &["te", "ten", "tengig", "tengige", "tengigabitethernet"],
    ),
    (
        "TwentyFiveGigE",
        "Twe",
        &["twe", "twentyfivegige", "twentyfivegigabitethernet"],
    ),
    (
        "FortyGigabitEthernet",
        "Fo",
        &["fo", "forty", "fortygige", "fortygigabitethernet"],
    ),
    (
        "HundredGigE",
        "Hu",
        &["hu", "hundredgige", "hundredgigabitethernet"],
    ),
    ("FastEthernet", "Fa", &["fa", "fast", "fastethernet"]),
    ("Ethernet", "Et", &["e", "et", "eth", "ethernet"]),
    ("Loopback", "Lo", &["lo", "loop", "loopback"]),
    (
        "Port-channel",
        "Po",
        &["po", "port-channel", "portchannel"],
    ),
    ("Vlan", "Vl", &["vl", "vlan"]),
    ("Tunnel", "Tu", &["tu", "tunnel"]),
    ("Management", "Mgmt", &["ma", "mgmt", "management"]),
    ("Serial", "Se", &["se", "serial"]),
    ("Bundle-Ether", "BE", &["be", "bundle-ether"]),
];

fn interface_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<kind>[A-Za-z][A-Za-z_\-]*?)\s*(?P<number>[0-9][0-9A-Za-z/\.:\-]*)$")
            .expect("interface pattern is valid")
    })
}

fn split_interface(name: &str) -> Option<(&'static InterfaceType, &str)> {
    let captures = interface_pattern().captures(name.trim())?;
    let kind = captures.name("kind")?.as_str().to_ascii_lowercase();
    let number = captures.name("number")?.as_str();
    INTERFACE_TYPES
        .iter()
        .find(|(_, _, aliases)| aliases.contains(&kind.as_str()))
        .map(|entry| (entry, number))
}

/// Shortens an interface name, e.g. `GigabitEthernet0/1` to `Gi0/1`.
/// Unknown interface types are returned unchanged.
pub fn abbreviate_interface_name(name: &str) -> Cow<'_, str> {
    match split_interface(name) {
        Some(((_, short, _), number)) => Cow::Owned(format!("{short}{number}")),
        None => Cow::Borrowed(name),
    }
}

/// Expands an interface name to its canonical long form, e.g. `Gi0/1` to
/// `GigabitEthernet0/1`. Unknown interface types are returned unchanged.
pub fn canonical_interface_name(name: &str) -> Cow<'_, str> {
    match split_interface(name) {
        Some(((long, _, _), number)) => Cow::Owned(format!("{long}{number}")),
        None => Cow::Borrowed(name),
    }
}

/// Normalizes dotted, dashed or colon MAC notations to lowercase colon form.
pub fn normalize_mac(input: &str) -> Result<String> {
    let digits: String = input
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '.' | ':' | '-'))
        .collect();
    if digits.len() != 12 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        bail!("'{input}' is not a MAC address");
    }
    let lowered = digits.to_ascii_lowercase();
    let octets = lowered
        .as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>();
    Ok(octets.join(":"))
}
