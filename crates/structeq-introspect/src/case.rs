//! Conversion of identifiers between naming conventions.

/// An identifier naming convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseFormat {
    /// `firstName`
    LowerCamel,
    /// `FirstName`
    UpperCamel,
    /// `first_name`
    LowerUnderscore,
    /// `FIRST_NAME`
    UpperUnderscore,
    /// `first-name`
    LowerHyphen,
}

impl CaseFormat {
    /// Convert `name`, written in this format, to `target`.
    pub fn to(self, target: CaseFormat, name: &str) -> String {
        if self == target {
            return name.to_string();
        }
        target.join(&self.split(name))
    }

    fn split(self, name: &str) -> Vec<String> {
        match self {
            Self::LowerCamel | Self::UpperCamel => {
                let mut words = Vec::new();
                let mut current = String::new();
                for c in name.chars() {
                    if c.is_uppercase() && !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                    current.extend(c.to_lowercase());
                }
                if !current.is_empty() {
                    words.push(current);
                }
                words
            }
            Self::LowerUnderscore | Self::UpperUnderscore => split_on(name, '_'),
            Self::LowerHyphen => split_on(name, '-'),
        }
    }

    fn join(self, words: &[String]) -> String {
        match self {
            Self::LowerCamel => {
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(word);
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            Self::UpperCamel => words.iter().map(|w| capitalize(w)).collect(),
            Self::LowerUnderscore => words.join("_"),
            Self::UpperUnderscore => words.join("_").to_uppercase(),
            Self::LowerHyphen => words.join("-"),
        }
    }
}

fn split_on(name: &str, separator: char) -> Vec<String> {
    name.split(separator)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_to_camel() {
        assert_eq!(
            CaseFormat::LowerUnderscore.to(CaseFormat::LowerCamel, "main_author"),
            "mainAuthor"
        );
        assert_eq!(
            CaseFormat::LowerUnderscore.to(CaseFormat::LowerCamel, "title"),
            "title"
        );
    }

    #[test]
    fn camel_to_snake() {
        assert_eq!(
            CaseFormat::LowerCamel.to(CaseFormat::LowerUnderscore, "firstName"),
            "first_name"
        );
        assert_eq!(
            CaseFormat::LowerCamel.to(CaseFormat::LowerUnderscore, "dateOfBirth"),
            "date_of_birth"
        );
    }

    #[test]
    fn other_formats() {
        assert_eq!(
            CaseFormat::UpperUnderscore.to(CaseFormat::UpperCamel, "LAST_NAME"),
            "LastName"
        );
        assert_eq!(
            CaseFormat::LowerCamel.to(CaseFormat::LowerHyphen, "homeAddress"),
            "home-address"
        );
        assert_eq!(
            CaseFormat::LowerCamel.to(CaseFormat::UpperUnderscore, "zipCode"),
            "ZIP_CODE"
        );
    }

    #[test]
    fn digits_stay_in_their_word() {
        assert_eq!(
            CaseFormat::LowerCamel.to(CaseFormat::LowerUnderscore, "line2Text"),
            "line2_text"
        );
    }
}
