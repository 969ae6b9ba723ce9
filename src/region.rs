//! Region matching for search.
//!
//! Region labels arrive as free text, a flag emoji, or both ("🇯🇵 Tokyo").
//! A search term matches a region when it matches the literal label or any
//! alias (ISO code, English or Chinese country name, flag) of a country the
//! label refers to.

/// One known country: ISO 3166-1 alpha-2 code plus display names.
struct Country {
    code: &'static str,
    names: &'static [&'static str],
}

const COUNTRIES: &[Country] = &[
    Country { code: "US", names: &["united states", "usa", "america", "美国"] },
    Country { code: "CA", names: &["canada", "加拿大"] },
    Country { code: "MX", names: &["mexico", "墨西哥"] },
    Country { code: "BR", names: &["brazil", "巴西"] },
    Country { code: "AR", names: &["argentina", "阿根廷"] },
    Country { code: "CL", names: &["chile", "智利"] },
    Country { code: "GB", names: &["united kingdom", "uk", "britain", "england", "英国"] },
    Country { code: "IE", names: &["ireland", "爱尔兰"] },
    Country { code: "FR", names: &["france", "法国"] },
    Country { code: "DE", names: &["germany", "德国"] },
    Country { code: "NL", names: &["netherlands", "holland", "荷兰"] },
    Country { code: "BE", names: &["belgium", "比利时"] },
    Country { code: "CH", names: &["switzerland", "瑞士"] },
    Country { code: "AT", names: &["austria", "奥地利"] },
    Country { code: "IT", names: &["italy", "意大利"] },
    Country { code: "ES", names: &["spain", "西班牙"] },
    Country { code: "PT", names: &["portugal", "葡萄牙"] },
    Country { code: "SE", names: &["sweden", "瑞典"] },
    Country { code: "NO", names: &["norway", "挪威"] },
    Country { code: "FI", names: &["finland", "芬兰"] },
    Country { code: "DK", names: &["denmark", "丹麦"] },
    Country { code: "PL", names: &["poland", "波兰"] },
    Country { code: "CZ", names: &["czechia", "czech republic", "捷克"] },
    Country { code: "RO", names: &["romania", "罗马尼亚"] },
    Country { code: "BG", names: &["bulgaria", "保加利亚"] },
    Country { code: "UA", names: &["ukraine", "乌克兰"] },
    Country { code: "RU", names: &["russia", "俄罗斯"] },
    Country { code: "TR", names: &["turkey", "türkiye", "土耳其"] },
    Country { code: "IL", names: &["israel", "以色列"] },
    Country { code: "AE", names: &["united arab emirates", "uae", "dubai", "阿联酋"] },
    Country { code: "IN", names: &["india", "印度"] },
    Country { code: "CN", names: &["china", "中国"] },
    Country { code: "HK", names: &["hong kong", "香港"] },
    Country { code: "MO", names: &["macau", "macao", "澳门"] },
    Country { code: "TW", names: &["taiwan", "台湾"] },
    Country { code: "JP", names: &["japan", "日本"] },
    Country { code: "KR", names: &["south korea", "korea", "韩国"] },
    Country { code: "SG", names: &["singapore", "新加坡"] },
    Country { code: "MY", names: &["malaysia", "马来西亚"] },
    Country { code: "TH", names: &["thailand", "泰国"] },
    Country { code: "VN", names: &["vietnam", "越南"] },
    Country { code: "PH", names: &["philippines", "菲律宾"] },
    Country { code: "ID", names: &["indonesia", "印度尼西亚", "印尼"] },
    Country { code: "AU", names: &["australia", "澳大利亚"] },
    Country { code: "NZ", names: &["new zealand", "新西兰"] },
    Country { code: "ZA", names: &["south africa", "南非"] },
    Country { code: "EG", names: &["egypt", "埃及"] },
    Country { code: "NG", names: &["nigeria", "尼日利亚"] },
];

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Flag emoji for a two-letter ISO code ("JP" -> "🇯🇵").
pub fn flag_for_code(code: &str) -> Option<String> {
    let bytes = code.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return None;
    }
    bytes
        .iter()
        .map(|b| char::from_u32(REGIONAL_INDICATOR_A + (b.to_ascii_uppercase() - b'A') as u32))
        .collect()
}

/// ISO codes encoded by the flag emojis in `s`, in order of appearance.
pub fn flag_codes(s: &str) -> Vec<String> {
    let indicators: Vec<char> = s
        .chars()
        .filter(|c| (REGIONAL_INDICATOR_A..REGIONAL_INDICATOR_A + 26).contains(&(*c as u32)))
        .collect();
    indicators
        .chunks_exact(2)
        .map(|pair| {
            pair.iter()
                .map(|c| (b'A' + (*c as u32 - REGIONAL_INDICATOR_A) as u8) as char)
                .collect()
        })
        .collect()
}

/// Countries a region label refers to, by flag or by name.
fn countries_in(region: &str) -> Vec<&'static Country> {
    let lower = region.to_lowercase();
    let codes = flag_codes(region);
    COUNTRIES
        .iter()
        .filter(|c| {
            codes.iter().any(|code| code == c.code)
                || c.names.iter().any(|name| contains_word(&lower, name))
        })
        .collect()
}

/// Substring test that requires ASCII names to sit on word boundaries, so
/// "uk" does not match inside "milwaukee". Non-ASCII names match anywhere.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if !needle.is_ascii() {
        return haystack.contains(needle);
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Returns true when `term` matches `region` literally or through an alias.
///
/// `term` is expected lowercased and trimmed, as the engine passes it.
pub fn is_region_match(region: &str, term: &str) -> bool {
    if term.is_empty() || region.is_empty() {
        return false;
    }
    if region.to_lowercase().contains(term) {
        return true;
    }
    let term_codes = flag_codes(term);
    countries_in(region).iter().any(|c| {
        c.code.eq_ignore_ascii_case(term)
            || term_codes.iter().any(|code| code == c.code)
            || c.names.iter().any(|name| name.contains(term))
    })
}

/// Display name for a region label: the first known country's English name,
/// or the label itself.
pub fn region_display_name(region: &str) -> String {
    let trimmed = region.trim();
    match countries_in(trimmed).first() {
        Some(c) if flag_codes(trimmed).len() == trimmed.chars().count() / 2 => {
            title_case(c.names[0])
        }
        _ => trimmed.to_string(),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_substring_matches() {
        assert!(is_region_match("US West", "west"));
        assert!(is_region_match("Frankfurt", "frank"));
        assert!(!is_region_match("Frankfurt", "paris"));
    }

    #[test]
    fn flag_matches_code_and_names() {
        assert!(is_region_match("🇯🇵", "jp"));
        assert!(is_region_match("🇯🇵", "japan"));
        assert!(is_region_match("🇯🇵", "jap"));
        assert!(is_region_match("🇯🇵 Tokyo", "日本"));
        assert!(!is_region_match("🇯🇵", "korea"));
    }

    #[test]
    fn name_matches_flag_term() {
        assert!(is_region_match("Germany", "🇩🇪"));
        assert!(is_region_match("香港", "hong kong"));
    }

    #[test]
    fn short_names_need_word_boundaries() {
        assert!(!is_region_match("Milwaukee", "united kingdom"));
        assert!(is_region_match("UK London", "britain"));
    }

    #[test]
    fn flag_round_trip() {
        assert_eq!(flag_for_code("jp").as_deref(), Some("🇯🇵"));
        assert_eq!(flag_codes("🇺🇸 / 🇨🇦"), vec!["US".to_string(), "CA".to_string()]);
        assert_eq!(flag_for_code("J1"), None);
    }

    #[test]
    fn display_name_expands_bare_flags() {
        assert_eq!(region_display_name("🇸🇬"), "Singapore");
        assert_eq!(region_display_name("🇸🇬 Jurong"), "🇸🇬 Jurong");
        assert_eq!(region_display_name("Mars"), "Mars");
    }
}
