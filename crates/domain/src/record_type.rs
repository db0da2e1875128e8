use std::fmt;

/// DNS record type as carried in a question.
///
/// Wraps the raw wire code so that types the proxy has no name for are still
/// forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType(u16);

impl RecordType {
    pub const A: Self = Self(1);
    pub const NS: Self = Self(2);
    pub const CNAME: Self = Self(5);
    pub const SOA: Self = Self(6);
    pub const PTR: Self = Self(12);
    pub const MX: Self = Self(15);
    pub const TXT: Self = Self(16);
    pub const AAAA: Self = Self(28);
    pub const SRV: Self = Self(33);
    pub const SVCB: Self = Self(64);
    pub const HTTPS: Self = Self(65);
    pub const ANY: Self = Self(255);
    pub const CAA: Self = Self(257);

    const NAMED: [(Self, &'static str); 13] = [
        (Self::A, "A"),
        (Self::NS, "NS"),
        (Self::CNAME, "CNAME"),
        (Self::SOA, "SOA"),
        (Self::PTR, "PTR"),
        (Self::MX, "MX"),
        (Self::TXT, "TXT"),
        (Self::AAAA, "AAAA"),
        (Self::SRV, "SRV"),
        (Self::SVCB, "SVCB"),
        (Self::HTTPS, "HTTPS"),
        (Self::ANY, "ANY"),
        (Self::CAA, "CAA"),
    ];

    pub const fn from_u16(code: u16) -> Self {
        Self(code)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(rt, _)| rt == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE{}", self.0),
        }
    }
}
