use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shortest and longest card numbers accepted, in digits.
pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;

/// Reason a single card field was rejected.
///
/// The `Display` text is what the payment page shows next to the field, so
/// every failure mode carries its own message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFieldError {
    #[error("Please enter a valid card number (13-19 digits)")]
    NumberFormat,
    #[error("Card number is not valid, please check the digits")]
    NumberChecksum,
    #[error("Please enter a valid expiry date (MM/YY)")]
    ExpiryFormat,
    #[error("Card has expired")]
    Expired,
    #[error("Please enter a valid CVV (3-4 digits)")]
    Cvv,
    #[error("Please enter a valid cardholder name")]
    HolderName,
    #[error("This field is required")]
    Required,
}

/// Outcome of validating one form field.
///
/// A field the user has not typed into yet is `Blank`: it carries no error
/// and is not counted as valid either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVerdict {
    Blank,
    Valid,
    Invalid(CardFieldError),
}

impl FieldVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The message to show beside the field, if any.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Invalid(err) => Some(err.to_string()),
            Self::Blank | Self::Valid => None,
        }
    }

    /// Turns a blank field into a `Required` error; used at submit time.
    pub fn required(self) -> Self {
        match self {
            Self::Blank => Self::Invalid(CardFieldError::Required),
            other => other,
        }
    }
}

impl fmt::Display for FieldVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank"),
            Self::Valid => write!(f, "ok"),
            Self::Invalid(err) => write!(f, "{}", err),
        }
    }
}

/// Luhn checksum over a string of ASCII digits.
///
/// Any non-digit character fails the check.
pub fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    for (position, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a card number. Whitespace anywhere in the input is ignored.
pub fn validate_number(raw: &str) -> FieldVerdict {
    let value = strip_whitespace(raw);
    if value.is_empty() {
        return FieldVerdict::Blank;
    }
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&value.len())
        || !value.bytes().all(|b| b.is_ascii_digit())
    {
        return FieldVerdict::Invalid(CardFieldError::NumberFormat);
    }
    if !luhn_check(&value) {
        return FieldVerdict::Invalid(CardFieldError::NumberChecksum);
    }
    FieldVerdict::Valid
}

/// A card expiry in `MM/YY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    month: u32,
    year: u32,
}

impl ExpiryDate {
    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit year.
    pub fn year(&self) -> u32 {
        self.year
    }

    /// True when the expiry month lies before the month containing `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        let current_year = today.year().rem_euclid(100) as u32;
        let current_month = today.month();
        self.year < current_year || (self.year == current_year && self.month < current_month)
    }
}

impl FromStr for ExpiryDate {
    type Err = CardFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b'/' {
            return Err(CardFieldError::ExpiryFormat);
        }
        let (mm, yy) = (&s[..2], &s[3..]);
        if !mm.bytes().chain(yy.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(CardFieldError::ExpiryFormat);
        }
        let month: u32 = mm.parse().map_err(|_| CardFieldError::ExpiryFormat)?;
        let year: u32 = yy.parse().map_err(|_| CardFieldError::ExpiryFormat)?;
        if !(1..=12).contains(&month) {
            return Err(CardFieldError::ExpiryFormat);
        }
        Ok(Self { month, year })
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// Validates an expiry string against the month containing `today`.
pub fn validate_expiry(raw: &str, today: NaiveDate) -> FieldVerdict {
    if raw.is_empty() {
        return FieldVerdict::Blank;
    }
    match raw.parse::<ExpiryDate>() {
        Err(err) => FieldVerdict::Invalid(err),
        Ok(expiry) if expiry.is_expired(today) => FieldVerdict::Invalid(CardFieldError::Expired),
        Ok(_) => FieldVerdict::Valid,
    }
}

pub fn validate_cvv(raw: &str) -> FieldVerdict {
    if raw.is_empty() {
        return FieldVerdict::Blank;
    }
    if (3..=4).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit()) {
        FieldVerdict::Valid
    } else {
        FieldVerdict::Invalid(CardFieldError::Cvv)
    }
}

/// Cardholder names are ASCII letters and whitespace, at least two
/// characters once trimmed.
pub fn validate_holder_name(raw: &str) -> FieldVerdict {
    let value = raw.trim();
    if value.is_empty() {
        return FieldVerdict::Blank;
    }
    if value.chars().count() >= 2
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        FieldVerdict::Valid
    } else {
        FieldVerdict::Invalid(CardFieldError::HolderName)
    }
}

/// Keeps only the ASCII digits of `raw`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformats card number input as groups of four digits.
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reformats expiry input as it is typed: `1` stays `1`, `122` becomes `12/2`,
/// `122599` becomes `12/25`.
pub fn format_expiry_input(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < 2 {
        return digits;
    }
    let year_end = digits.len().min(4);
    format!("{}/{}", &digits[..2], &digits[2..year_end])
}

/// Raw card fields as typed into the payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInput {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

/// Per-field verdicts for a [`CardInput`]. Every field is always evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardReport {
    pub number: FieldVerdict,
    pub expiry: FieldVerdict,
    pub cvv: FieldVerdict,
    pub holder_name: FieldVerdict,
}

impl CardReport {
    /// True only when every field is `Valid`.
    pub fn is_valid(&self) -> bool {
        self.fields().iter().all(|(_, verdict)| verdict.is_valid())
    }

    /// True when some entered field failed; blank fields do not count.
    pub fn has_errors(&self) -> bool {
        self.fields().iter().any(|(_, verdict)| verdict.is_invalid())
    }

    pub fn fields(&self) -> [(&'static str, FieldVerdict); 4] {
        [
            ("number", self.number),
            ("expiry", self.expiry),
            ("cvv", self.cvv),
            ("holder_name", self.holder_name),
        ]
    }

    fn required(self) -> Self {
        Self {
            number: self.number.required(),
            expiry: self.expiry.required(),
            cvv: self.cvv.required(),
            holder_name: self.holder_name.required(),
        }
    }
}

impl CardInput {
    /// Validation while the user types: blank fields stay quiet.
    pub fn validate_live(&self, today: NaiveDate) -> CardReport {
        CardReport {
            number: validate_number(&self.number),
            expiry: validate_expiry(&self.expiry, today),
            cvv: validate_cvv(&self.cvv),
            holder_name: validate_holder_name(&self.holder_name),
        }
    }

    /// Validation on submit: blank fields are reported as required.
    pub fn validate_for_submission(&self, today: NaiveDate) -> CardReport {
        self.validate_live(today).required()
    }
}

/// Card details that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: ExpiryDate,
    pub cvv: String,
    pub holder_name: String,
}

impl CardDetails {
    /// Builds validated details, or returns the report explaining the rejection.
    pub fn from_input(input: &CardInput, today: NaiveDate) -> Result<Self, CardReport> {
        let report = input.validate_for_submission(today);
        if !report.is_valid() {
            return Err(report);
        }
        let expiry = input.expiry.parse().map_err(|_| report)?;
        Ok(Self {
            number: strip_whitespace(&input.number),
            expiry,
            cvv: input.cvv.clone(),
            holder_name: input.holder_name.trim().to_string(),
        })
    }

    /// Last four digits, for receipts and logs.
    pub fn last_four(&self) -> &str {
        &self.number[self.number.len() - 4..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_luhn_known_numbers() {
        assert!(luhn_check("4532015112830366"));
        assert!(!luhn_check("4532015112830367"));
        assert!(luhn_check("4111111111111111"));
        assert!(luhn_check("378282246310005"));
        assert!(!luhn_check("41111111111x1111"));
    }

    #[test]
    fn test_number_ignores_spaces() {
        assert_eq!(validate_number("4111 1111 1111 1111"), FieldVerdict::Valid);
        assert_eq!(validate_number("4111111111111111"), FieldVerdict::Valid);
        assert_eq!(validate_number(" 4532 0151 1283 0366 "), FieldVerdict::Valid);
    }

    #[test]
    fn test_number_blank_is_not_an_error() {
        assert_eq!(validate_number(""), FieldVerdict::Blank);
        assert_eq!(validate_number("   "), FieldVerdict::Blank);
        assert_eq!(validate_number("").reason(), None);
    }

    #[test]
    fn test_number_format_and_checksum_are_distinct() {
        assert_eq!(
            validate_number("12345"),
            FieldVerdict::Invalid(CardFieldError::NumberFormat)
        );
        assert_eq!(
            validate_number("4111-1111-1111-1111"),
            FieldVerdict::Invalid(CardFieldError::NumberFormat)
        );
        assert_eq!(
            validate_number("45320151128303661234"),
            FieldVerdict::Invalid(CardFieldError::NumberFormat)
        );
        assert_eq!(
            validate_number("4532015112830367"),
            FieldVerdict::Invalid(CardFieldError::NumberChecksum)
        );
        assert_ne!(
            CardFieldError::NumberFormat.to_string(),
            CardFieldError::NumberChecksum.to_string()
        );
    }

    /// Appends the digit that makes `payload` pass the Luhn check.
    fn with_check_digit(payload: &str) -> String {
        let sum: u32 = payload
            .chars()
            .rev()
            .enumerate()
            .map(|(position, c)| {
                let digit = c.to_digit(10).unwrap();
                match position % 2 {
                    0 if digit * 2 > 9 => digit * 2 - 9,
                    0 => digit * 2,
                    _ => digit,
                }
            })
            .sum();
        format!("{}{}", payload, (10 - sum % 10) % 10)
    }

    #[test]
    fn test_number_length_boundaries() {
        assert_eq!(with_check_digit("422222222222"), "4222222222222");
        assert_eq!(validate_number("4222222222222"), FieldVerdict::Valid);
        assert_eq!(validate_number("4111111111111111110"), FieldVerdict::Valid);

        assert!(luhn_check("424242424242"));
        assert_eq!(
            validate_number("424242424242"),
            FieldVerdict::Invalid(CardFieldError::NumberFormat)
        );
        assert!(luhn_check("41111111111111111115"));
        assert_eq!(
            validate_number("41111111111111111115"),
            FieldVerdict::Invalid(CardFieldError::NumberFormat)
        );
    }

    #[test]
    fn test_generated_numbers_follow_the_checksum() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let len = rng.gen_range(MIN_CARD_DIGITS..=MAX_CARD_DIGITS);
            let payload: String = (1..len)
                .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                .collect();
            let number = with_check_digit(&payload);
            assert_eq!(number.len(), len);
            assert_eq!(validate_number(&number), FieldVerdict::Valid, "{number}");

            let last = number.as_bytes()[len - 1] - b'0';
            let altered = format!("{}{}", payload, (last + rng.gen_range(1..10u8)) % 10);
            assert_eq!(
                validate_number(&altered),
                FieldVerdict::Invalid(CardFieldError::NumberChecksum),
                "{altered}"
            );
        }
    }

    #[test]
    fn test_expiry_expired_vs_format() {
        let today = june_2025();
        assert_eq!(
            validate_expiry("01/20", today),
            FieldVerdict::Invalid(CardFieldError::Expired)
        );
        assert_eq!(
            validate_expiry("13/25", today),
            FieldVerdict::Invalid(CardFieldError::ExpiryFormat)
        );
        assert_eq!(
            validate_expiry("00/30", today),
            FieldVerdict::Invalid(CardFieldError::ExpiryFormat)
        );
        assert_eq!(
            validate_expiry("1/25", today),
            FieldVerdict::Invalid(CardFieldError::ExpiryFormat)
        );
        assert_eq!(validate_expiry("", today), FieldVerdict::Blank);
    }

    #[test]
    fn test_expiry_current_month_is_still_valid() {
        let today = june_2025();
        assert_eq!(validate_expiry("06/25", today), FieldVerdict::Valid);
        assert_eq!(
            validate_expiry("05/25", today),
            FieldVerdict::Invalid(CardFieldError::Expired)
        );
        assert_eq!(validate_expiry("01/26", today), FieldVerdict::Valid);
    }

    #[test]
    fn test_expiry_display_round_trip() {
        let expiry: ExpiryDate = "07/29".parse().unwrap();
        assert_eq!(expiry.month(), 7);
        assert_eq!(expiry.year(), 29);
        assert_eq!(expiry.to_string(), "07/29");
    }

    #[test]
    fn test_cvv_rules() {
        assert_eq!(validate_cvv("123"), FieldVerdict::Valid);
        assert_eq!(validate_cvv("1234"), FieldVerdict::Valid);
        assert_eq!(validate_cvv("12"), FieldVerdict::Invalid(CardFieldError::Cvv));
        assert_eq!(validate_cvv("12a"), FieldVerdict::Invalid(CardFieldError::Cvv));
        assert_eq!(validate_cvv("12345"), FieldVerdict::Invalid(CardFieldError::Cvv));
        assert_eq!(validate_cvv(""), FieldVerdict::Blank);
    }

    #[test]
    fn test_holder_name_rules() {
        assert_eq!(
            validate_holder_name("A"),
            FieldVerdict::Invalid(CardFieldError::HolderName)
        );
        assert_eq!(validate_holder_name("Jo Lee"), FieldVerdict::Valid);
        assert_eq!(
            validate_holder_name("Jo3"),
            FieldVerdict::Invalid(CardFieldError::HolderName)
        );
        assert_eq!(validate_holder_name("  Ann  "), FieldVerdict::Valid);
        assert_eq!(validate_holder_name("   "), FieldVerdict::Blank);
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-11"), "4111 11");
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_expiry_input("1"), "1");
        assert_eq!(format_expiry_input("12"), "12/");
        assert_eq!(format_expiry_input("122"), "12/2");
        assert_eq!(format_expiry_input("12/25"), "12/25");
        assert_eq!(format_expiry_input("122599"), "12/25");
        assert_eq!(digits_only("1a2 3"), "123");
    }

    #[test]
    fn test_report_evaluates_every_field() {
        let input = CardInput {
            number: "12345".to_string(),
            expiry: "13/25".to_string(),
            cvv: "1".to_string(),
            holder_name: "Jo3".to_string(),
        };
        let report = input.validate_live(june_2025());
        assert!(report.number.is_invalid());
        assert!(report.expiry.is_invalid());
        assert!(report.cvv.is_invalid());
        assert!(report.holder_name.is_invalid());
        assert!(report.has_errors());
    }

    #[test]
    fn test_submission_requires_blank_fields() {
        let input = CardInput {
            number: "4111 1111 1111 1111".to_string(),
            ..Default::default()
        };
        let live = input.validate_live(june_2025());
        assert!(!live.has_errors());
        assert!(!live.is_valid());

        let submitted = input.validate_for_submission(june_2025());
        assert_eq!(submitted.number, FieldVerdict::Valid);
        assert_eq!(submitted.cvv, FieldVerdict::Invalid(CardFieldError::Required));
    }

    #[test]
    fn test_card_details_from_valid_input() {
        let input = CardInput {
            number: "4532 0151 1283 0366".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
            holder_name: " Jo Lee ".to_string(),
        };
        let details = CardDetails::from_input(&input, june_2025()).unwrap();
        assert_eq!(details.number, "4532015112830366");
        assert_eq!(details.holder_name, "Jo Lee");
        assert_eq!(details.last_four(), "0366");
        assert_eq!(details.expiry.month(), 12);
    }
}
