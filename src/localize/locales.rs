// src/localize/locales.rs
use crate::config::consts::NPC_PATH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Wowhead subdomain serving this language.
    pub subdomain: &'static str,
    /// Game client locale code.
    pub code: &'static str,
}

pub const DEFAULT_LOCALE: &str = "enUS";

pub static LOCALES: [Locale; 9] = [
    Locale { subdomain: "www", code: "enUS" },
    Locale { subdomain: "de", code: "deDE" },
    Locale { subdomain: "es", code: "esES" },
    Locale { subdomain: "fr", code: "frFR" },
    Locale { subdomain: "it", code: "itIT" },
    Locale { subdomain: "pt", code: "ptBR" },
    Locale { subdomain: "ru", code: "ruRU" },
    Locale { subdomain: "ko", code: "koKR" },
    Locale { subdomain: "cn", code: "zhCN" },
];

impl Locale {
    pub fn is_default(&self) -> bool {
        self.code == DEFAULT_LOCALE
    }

    /// `L = ...`, the assignment naming this module's block in a locale file.
    pub fn assignment(&self, module: &str) -> String {
        match self.code {
            DEFAULT_LOCALE => s!("L = mod:GetLocale()"),
            // esMX shares the Spanish strings
            "esES" => format!(
                "L = BigWigs:NewBossLocale(\"{module}\", \"esES\") or BigWigs:NewBossLocale(\"{module}\", \"esMX\")"
            ),
            code => format!("L = BigWigs:NewBossLocale(\"{module}\", \"{code}\")"),
        }
    }

    /// The `local L = ...` line opening the first block of a file.
    pub fn header(&self, module: &str) -> String {
        format!("local {}", self.assignment(module))
    }

    /// `base_url` carries a `{subdomain}` placeholder.
    pub fn npc_url(&self, base_url: &str, id: u64) -> String {
        let mut url = base_url.replace("{subdomain}", self.subdomain);
        url.push_str(&NPC_PATH.replace("{id}", &id.to_string()));
        url
    }
}

pub fn find(code: &str) -> Option<&'static Locale> {
    LOCALES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        let de = find("deDE").unwrap();
        assert_eq!(de.header("Odyn"), r#"local L = BigWigs:NewBossLocale("Odyn", "deDE")"#);
        assert_eq!(find("enUS").unwrap().header("Odyn"), "local L = mod:GetLocale()");
        assert!(find("esES").unwrap().header("Odyn").ends_with(r#"BigWigs:NewBossLocale("Odyn", "esMX")"#));
        assert_eq!(de.assignment("Odyn"), r#"L = BigWigs:NewBossLocale("Odyn", "deDE")"#);
    }

    #[test]
    fn urls() {
        let fr = find("frfr").unwrap();
        assert_eq!(fr.npc_url("https://{subdomain}.wowhead.com", 114544), "https://fr.wowhead.com/npc=114544");
        assert_eq!(fr.npc_url("http://127.0.0.1:8080/{subdomain}", 1), "http://127.0.0.1:8080/fr/npc=1");
    }

    #[test]
    fn unknown_code() {
        assert!(find("xxXX").is_none());
    }
}
