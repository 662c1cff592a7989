use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ISO 4217 alphabetic currency code as supplied by callers.
///
/// A code is only a key; resolve it against the reference table with
/// [`CurrencyCode::resolve`] to obtain the [`Currency`] record.
///
/// # Examples
///
/// ```
/// use settlement_report::core::currency::CurrencyCode;
///
/// let aed = CurrencyCode::new("AED");
/// assert_eq!(aed.resolve().unwrap().numeric_code(), 784);
/// assert!(CurrencyCode::new("PDB").resolve().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look this code up in the ISO 4217 reference table.
    pub fn resolve(&self) -> Result<&'static Currency, CurrencyError> {
        Currency::lookup(&self.0)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors arising from currency reference lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("unknown currency code '{0}'")]
    Unknown(String),
}

/// One row of the ISO 4217 reference table.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Currency {
    code: &'static str,
    numeric_code: u16,
    /// Digits after the decimal point; `None` for metals, bond units and
    /// other codes where a minor unit is not meaningful.
    minor_unit: Option<u8>,
    name: &'static str,
}

impl Currency {
    const fn new(
        code: &'static str,
        numeric_code: u16,
        minor_unit: Option<u8>,
        name: &'static str,
    ) -> Self {
        Self {
            code,
            numeric_code,
            minor_unit,
            name,
        }
    }

    /// Find a currency by alphabetic code (exact, case-sensitive match).
    pub fn lookup(code: &str) -> Result<&'static Currency, CurrencyError> {
        CURRENCIES
            .binary_search_by(|c| c.code.cmp(code))
            .map(|idx| &CURRENCIES[idx])
            .map_err(|_| CurrencyError::Unknown(code.to_string()))
    }

    /// The whole reference table, ordered by alphabetic code.
    pub fn all() -> &'static [Currency] {
        CURRENCIES
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn numeric_code(&self) -> u16 {
        self.numeric_code
    }

    /// Numeric code zero-padded to three digits, e.g. `"008"` for ALL.
    pub fn numeric_code_padded(&self) -> String {
        format!("{:03}", self.numeric_code)
    }

    pub fn minor_unit(&self) -> Option<u8> {
        self.minor_unit
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        self.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

// ISO 4217, list one, January 2017. Must stay sorted by code for lookup.
static CURRENCIES: &[Currency] = &[
    Currency::new("AED", 784, Some(2), "UAE Dirham"),
    Currency::new("AFN", 971, Some(2), "Afghani"),
    Currency::new("ALL", 8, Some(2), "Lek"),
    Currency::new("AMD", 51, Some(2), "Armenian Dram"),
    Currency::new("ANG", 532, Some(2), "Netherlands Antillean Guilder"),
    Currency::new("AOA", 973, Some(2), "Kwanza"),
    Currency::new("ARS", 32, Some(2), "Argentine Peso"),
    Currency::new("AUD", 36, Some(2), "Australian Dollar"),
    Currency::new("AWG", 533, Some(2), "Aruban Florin"),
    Currency::new("AZN", 944, Some(2), "Azerbaijanian Manat"),
    Currency::new("BAM", 977, Some(2), "Convertible Mark"),
    Currency::new("BBD", 52, Some(2), "Barbados Dollar"),
    Currency::new("BDT", 50, Some(2), "Taka"),
    Currency::new("BGN", 975, Some(2), "Bulgarian Lev"),
    Currency::new("BHD", 48, Some(3), "Bahraini Dinar"),
    Currency::new("BIF", 108, Some(0), "Burundi Franc"),
    Currency::new("BMD", 60, Some(2), "Bermudian Dollar"),
    Currency::new("BND", 96, Some(2), "Brunei Dollar"),
    Currency::new("BOB", 68, Some(2), "Boliviano"),
    Currency::new("BOV", 984, Some(2), "Mvdol"),
    Currency::new("BRL", 986, Some(2), "Brazilian Real"),
    Currency::new("BSD", 44, Some(2), "Bahamian Dollar"),
    Currency::new("BTN", 64, Some(2), "Ngultrum"),
    Currency::new("BWP", 72, Some(2), "Pula"),
    Currency::new("BYN", 933, Some(2), "Belarusian Ruble"),
    Currency::new("BZD", 84, Some(2), "Belize Dollar"),
    Currency::new("CAD", 124, Some(2), "Canadian Dollar"),
    Currency::new("CDF", 976, Some(2), "Congolese Franc"),
    Currency::new("CHE", 947, Some(2), "WIR Euro"),
    Currency::new("CHF", 756, Some(2), "Swiss Franc"),
    Currency::new("CHW", 948, Some(2), "WIR Franc"),
    Currency::new("CLF", 990, Some(4), "Unidad de Fomento"),
    Currency::new("CLP", 152, Some(0), "Chilean Peso"),
    Currency::new("CNY", 156, Some(2), "Yuan Renminbi"),
    Currency::new("COP", 170, Some(2), "Colombian Peso"),
    Currency::new("COU", 970, Some(2), "Unidad de Valor Real"),
    Currency::new("CRC", 188, Some(2), "Costa Rican Colon"),
    Currency::new("CUC", 931, Some(2), "Peso Convertible"),
    Currency::new("CUP", 192, Some(2), "Cuban Peso"),
    Currency::new("CVE", 132, Some(2), "Cabo Verde Escudo"),
    Currency::new("CZK", 203, Some(2), "Czech Koruna"),
    Currency::new("DJF", 262, Some(0), "Djibouti Franc"),
    Currency::new("DKK", 208, Some(2), "Danish Krone"),
    Currency::new("DOP", 214, Some(2), "Dominican Peso"),
    Currency::new("DZD", 12, Some(2), "Algerian Dinar"),
    Currency::new("EGP", 818, Some(2), "Egyptian Pound"),
    Currency::new("ERN", 232, Some(2), "Nakfa"),
    Currency::new("ETB", 230, Some(2), "Ethiopian Birr"),
    Currency::new("EUR", 978, Some(2), "Euro"),
    Currency::new("FJD", 242, Some(2), "Fiji Dollar"),
    Currency::new("FKP", 238, Some(2), "Falkland Islands Pound"),
    Currency::new("GBP", 826, Some(2), "Pound Sterling"),
    Currency::new("GEL", 981, Some(2), "Lari"),
    Currency::new("GHS", 936, Some(2), "Ghana Cedi"),
    Currency::new("GIP", 292, Some(2), "Gibraltar Pound"),
    Currency::new("GMD", 270, Some(2), "Dalasi"),
    Currency::new("GNF", 324, Some(0), "Guinea Franc"),
    Currency::new("GTQ", 320, Some(2), "Quetzal"),
    Currency::new("GYD", 328, Some(2), "Guyana Dollar"),
    Currency::new("HKD", 344, Some(2), "Hong Kong Dollar"),
    Currency::new("HNL", 340, Some(2), "Lempira"),
    Currency::new("HRK", 191, Some(2), "Kuna"),
    Currency::new("HTG", 332, Some(2), "Gourde"),
    Currency::new("HUF", 348, Some(2), "Forint"),
    Currency::new("IDR", 360, Some(2), "Rupiah"),
    Currency::new("ILS", 376, Some(2), "New Israeli Sheqel"),
    Currency::new("INR", 356, Some(2), "Indian Rupee"),
    Currency::new("IQD", 368, Some(3), "Iraqi Dinar"),
    Currency::new("IRR", 364, Some(2), "Iranian Rial"),
    Currency::new("ISK", 352, Some(0), "Iceland Krona"),
    Currency::new("JMD", 388, Some(2), "Jamaican Dollar"),
    Currency::new("JOD", 400, Some(3), "Jordanian Dinar"),
    Currency::new("JPY", 392, Some(0), "Yen"),
    Currency::new("KES", 404, Some(2), "Kenyan Shilling"),
    Currency::new("KGS", 417, Some(2), "Som"),
    Currency::new("KHR", 116, Some(2), "Riel"),
    Currency::new("KMF", 174, Some(0), "Comoro Franc"),
    Currency::new("KPW", 408, Some(2), "North Korean Won"),
    Currency::new("KRW", 410, Some(0), "Won"),
    Currency::new("KWD", 414, Some(3), "Kuwaiti Dinar"),
    Currency::new("KYD", 136, Some(2), "Cayman Islands Dollar"),
    Currency::new("KZT", 398, Some(2), "Tenge"),
    Currency::new("LAK", 418, Some(2), "Kip"),
    Currency::new("LBP", 422, Some(2), "Lebanese Pound"),
    Currency::new("LKR", 144, Some(2), "Sri Lanka Rupee"),
    Currency::new("LRD", 430, Some(2), "Liberian Dollar"),
    Currency::new("LSL", 426, Some(2), "Loti"),
    Currency::new("LYD", 434, Some(3), "Libyan Dinar"),
    Currency::new("MAD", 504, Some(2), "Moroccan Dirham"),
    Currency::new("MDL", 498, Some(2), "Moldovan Leu"),
    Currency::new("MGA", 969, Some(2), "Malagasy Ariary"),
    Currency::new("MKD", 807, Some(2), "Denar"),
    Currency::new("MMK", 104, Some(2), "Kyat"),
    Currency::new("MNT", 496, Some(2), "Tugrik"),
    Currency::new("MOP", 446, Some(2), "Pataca"),
    Currency::new("MRO", 478, Some(2), "Ouguiya"),
    Currency::new("MUR", 480, Some(2), "Mauritius Rupee"),
    Currency::new("MVR", 462, Some(2), "Rufiyaa"),
    Currency::new("MWK", 454, Some(2), "Malawi Kwacha"),
    Currency::new("MXN", 484, Some(2), "Mexican Peso"),
    Currency::new("MXV", 979, Some(2), "Mexican Unidad de Inversion (UDI)"),
    Currency::new("MYR", 458, Some(2), "Malaysian Ringgit"),
    Currency::new("MZN", 943, Some(2), "Mozambique Metical"),
    Currency::new("NAD", 516, Some(2), "Namibia Dollar"),
    Currency::new("NGN", 566, Some(2), "Naira"),
    Currency::new("NIO", 558, Some(2), "Cordoba Oro"),
    Currency::new("NOK", 578, Some(2), "Norwegian Krone"),
    Currency::new("NPR", 524, Some(2), "Nepalese Rupee"),
    Currency::new("NZD", 554, Some(2), "New Zealand Dollar"),
    Currency::new("OMR", 512, Some(3), "Rial Omani"),
    Currency::new("PAB", 590, Some(2), "Balboa"),
    Currency::new("PEN", 604, Some(2), "Sol"),
    Currency::new("PGK", 598, Some(2), "Kina"),
    Currency::new("PHP", 608, Some(2), "Philippine Peso"),
    Currency::new("PKR", 586, Some(2), "Pakistan Rupee"),
    Currency::new("PLN", 985, Some(2), "Zloty"),
    Currency::new("PYG", 600, Some(0), "Guarani"),
    Currency::new("QAR", 634, Some(2), "Qatari Rial"),
    Currency::new("RON", 946, Some(2), "Romanian Leu"),
    Currency::new("RSD", 941, Some(2), "Serbian Dinar"),
    Currency::new("RUB", 643, Some(2), "Russian Ruble"),
    Currency::new("RWF", 646, Some(0), "Rwanda Franc"),
    Currency::new("SAR", 682, Some(2), "Saudi Riyal"),
    Currency::new("SBD", 90, Some(2), "Solomon Islands Dollar"),
    Currency::new("SCR", 690, Some(2), "Seychelles Rupee"),
    Currency::new("SDG", 938, Some(2), "Sudanese Pound"),
    Currency::new("SEK", 752, Some(2), "Swedish Krona"),
    Currency::new("SGD", 702, Some(2), "Singapore Dollar"),
    Currency::new("SHP", 654, Some(2), "Saint Helena Pound"),
    Currency::new("SLL", 694, Some(2), "Leone"),
    Currency::new("SOS", 706, Some(2), "Somali Shilling"),
    Currency::new("SRD", 968, Some(2), "Surinam Dollar"),
    Currency::new("SSP", 728, Some(2), "South Sudanese Pound"),
    Currency::new("STD", 678, Some(2), "Dobra"),
    Currency::new("SVC", 222, Some(2), "El Salvador Colon"),
    Currency::new("SYP", 760, Some(2), "Syrian Pound"),
    Currency::new("SZL", 748, Some(2), "Lilangeni"),
    Currency::new("THB", 764, Some(2), "Baht"),
    Currency::new("TJS", 972, Some(2), "Somoni"),
    Currency::new("TMT", 934, Some(2), "Turkmenistan New Manat"),
    Currency::new("TND", 788, Some(3), "Tunisian Dinar"),
    Currency::new("TRY", 949, Some(2), "Turkish Lira"),
    Currency::new("TTD", 780, Some(2), "Trinidad and Tobago Dollar"),
    Currency::new("TWD", 901, Some(2), "New Taiwan Dollar"),
    Currency::new("TZS", 834, Some(2), "Tanzanian Shilling"),
    Currency::new("UAH", 980, Some(2), "Hryvnia"),
    Currency::new("UGX", 800, Some(0), "Uganda Shilling"),
    Currency::new("USD", 840, Some(2), "US Dollar"),
    Currency::new("USN", 997, Some(2), "US Dollar (Next day)"),
    Currency::new("UYI", 940, Some(0), "Uruguay Peso en Unidades Indexadas (URUIURUI)"),
    Currency::new("UYU", 858, Some(2), "Peso Uruguayo"),
    Currency::new("UZS", 860, Some(2), "Uzbekistan Sum"),
    Currency::new("VND", 704, Some(0), "Dong"),
    Currency::new("VUV", 548, Some(0), "Vatu"),
    Currency::new("WST", 882, Some(2), "Tala"),
    Currency::new("XAF", 950, Some(0), "CFA Franc BEAC"),
    Currency::new("XAG", 961, None, "Silver"),
    Currency::new("XAU", 959, None, "Gold"),
    Currency::new("XBA", 955, None, "Bond Markets Unit European Composite Unit (EURCO)"),
    Currency::new("XBB", 956, None, "Bond Markets Unit European Monetary Unit (E.M.U.-6)"),
    Currency::new("XBC", 957, None, "Bond Markets Unit European Unit of Account 9 (E.U.A.-9)"),
    Currency::new("XBD", 958, None, "Bond Markets Unit European Unit of Account 17 (E.U.A.-17)"),
    Currency::new("XCD", 951, Some(2), "East Caribbean Dollar"),
    Currency::new("XDR", 960, None, "SDR (Special Drawing Right)"),
    Currency::new("XOF", 952, Some(0), "CFA Franc BCEAO"),
    Currency::new("XPD", 964, None, "Palladium"),
    Currency::new("XPF", 953, Some(0), "CFP Franc"),
    Currency::new("XPT", 962, None, "Platinum"),
    Currency::new("XSU", 994, None, "Sucre"),
    Currency::new("XTS", 963, None, "Codes specifically reserved for testing purposes"),
    Currency::new("XUA", 965, None, "ADB Unit of Account"),
    Currency::new("XXX", 999, None, "The codes assigned for transactions where no currency is involved"),
    Currency::new("YER", 886, Some(2), "Yemeni Rial"),
    Currency::new("ZAR", 710, Some(2), "Rand"),
    Currency::new("ZMW", 967, Some(2), "Zambian Kwacha"),
    Currency::new("ZWL", 932, Some(2), "Zimbabwe Dollar"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::new("USD");
        assert_eq!(a, b);
    }

    #[test]
    fn test_table_sorted_and_unique() {
        for pair in Currency::all().windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{} !< {}", pair[0], pair[1]);
        }
        assert!(Currency::all().len() > 150);
    }

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(Currency::lookup("AED").unwrap().numeric_code(), 784);
        assert_eq!(Currency::lookup("SAR").unwrap().numeric_code(), 682);
        assert_eq!(Currency::lookup("SGD").unwrap().name(), "Singapore Dollar");
        assert_eq!(Currency::lookup("JPY").unwrap().minor_unit(), Some(0));
        assert_eq!(Currency::lookup("BHD").unwrap().minor_unit(), Some(3));
    }

    #[test]
    fn test_precious_metals_have_no_minor_unit() {
        assert_eq!(Currency::lookup("XAU").unwrap().minor_unit(), None);
        assert_eq!(Currency::lookup("XAG").unwrap().minor_unit(), None);
    }

    #[test]
    fn test_unknown_currency() {
        // The sample data's "SGP" is a country code, not a currency.
        assert_eq!(
            Currency::lookup("SGP"),
            Err(CurrencyError::Unknown("SGP".to_string()))
        );
        assert!(CurrencyCode::new("usd").resolve().is_err());
    }

    #[test]
    fn test_numeric_code_padding() {
        assert_eq!(Currency::lookup("ALL").unwrap().numeric_code_padded(), "008");
        assert_eq!(Currency::lookup("AUD").unwrap().numeric_code_padded(), "036");
        for c in Currency::all().iter().filter(|c| c.numeric_code() < 100) {
            assert!(c.numeric_code_padded().starts_with('0'));
        }
    }

    #[test]
    fn test_us_dollar_variants() {
        let us: Vec<_> = Currency::all()
            .iter()
            .filter(|c| c.code().starts_with("US"))
            .map(|c| c.code())
            .collect();
        assert!(us.contains(&"USD"));
        assert!(us.contains(&"USN"));
    }
}
