//! Static country-name registry for search localization.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// ISO 3166-1 English short names mapped to the lowercase alpha-2 codes the
/// search provider's `country` parameter expects.
const COUNTRIES: &[(&str, &str)] = &[
    ("Afghanistan", "af"),
    ("Albania", "al"),
    ("Algeria", "dz"),
    ("Andorra", "ad"),
    ("Angola", "ao"),
    ("Antigua and Barbuda", "ag"),
    ("Argentina", "ar"),
    ("Armenia", "am"),
    ("Australia", "au"),
    ("Austria", "at"),
    ("Azerbaijan", "az"),
    ("Bahamas", "bs"),
    ("Bahrain", "bh"),
    ("Bangladesh", "bd"),
    ("Barbados", "bb"),
    ("Belarus", "by"),
    ("Belgium", "be"),
    ("Belize", "bz"),
    ("Benin", "bj"),
    ("Bhutan", "bt"),
    ("Bolivia", "bo"),
    ("Bosnia and Herzegovina", "ba"),
    ("Botswana", "bw"),
    ("Brazil", "br"),
    ("Brunei", "bn"),
    ("Bulgaria", "bg"),
    ("Burkina Faso", "bf"),
    ("Burundi", "bi"),
    ("Cabo Verde", "cv"),
    ("Cambodia", "kh"),
    ("Cameroon", "cm"),
    ("Canada", "ca"),
    ("Central African Republic", "cf"),
    ("Chad", "td"),
    ("Chile", "cl"),
    ("China", "cn"),
    ("Colombia", "co"),
    ("Comoros", "km"),
    ("Congo", "cg"),
    ("Costa Rica", "cr"),
    ("Croatia", "hr"),
    ("Cuba", "cu"),
    ("Cyprus", "cy"),
    ("Czechia", "cz"),
    ("Democratic Republic of the Congo", "cd"),
    ("Denmark", "dk"),
    ("Djibouti", "dj"),
    ("Dominica", "dm"),
    ("Dominican Republic", "do"),
    ("Ecuador", "ec"),
    ("Egypt", "eg"),
    ("El Salvador", "sv"),
    ("Equatorial Guinea", "gq"),
    ("Eritrea", "er"),
    ("Estonia", "ee"),
    ("Eswatini", "sz"),
    ("Ethiopia", "et"),
    ("Fiji", "fj"),
    ("Finland", "fi"),
    ("France", "fr"),
    ("Gabon", "ga"),
    ("Gambia", "gm"),
    ("Georgia", "ge"),
    ("Germany", "de"),
    ("Ghana", "gh"),
    ("Greece", "gr"),
    ("Grenada", "gd"),
    ("Guatemala", "gt"),
    ("Guinea", "gn"),
    ("Guinea-Bissau", "gw"),
    ("Guyana", "gy"),
    ("Haiti", "ht"),
    ("Honduras", "hn"),
    ("Hong Kong", "hk"),
    ("Hungary", "hu"),
    ("Iceland", "is"),
    ("India", "in"),
    ("Indonesia", "id"),
    ("Iran", "ir"),
    ("Iraq", "iq"),
    ("Ireland", "ie"),
    ("Israel", "il"),
    ("Italy", "it"),
    ("Ivory Coast", "ci"),
    ("Jamaica", "jm"),
    ("Japan", "jp"),
    ("Jordan", "jo"),
    ("Kazakhstan", "kz"),
    ("Kenya", "ke"),
    ("Kiribati", "ki"),
    ("Kosovo", "xk"),
    ("Kuwait", "kw"),
    ("Kyrgyzstan", "kg"),
    ("Laos", "la"),
    ("Latvia", "lv"),
    ("Lebanon", "lb"),
    ("Lesotho", "ls"),
    ("Liberia", "lr"),
    ("Libya", "ly"),
    ("Liechtenstein", "li"),
    ("Lithuania", "lt"),
    ("Luxembourg", "lu"),
    ("Macau", "mo"),
    ("Madagascar", "mg"),
    ("Malawi", "mw"),
    ("Malaysia", "my"),
    ("Maldives", "mv"),
    ("Mali", "ml"),
    ("Malta", "mt"),
    ("Marshall Islands", "mh"),
    ("Mauritania", "mr"),
    ("Mauritius", "mu"),
    ("Mexico", "mx"),
    ("Micronesia", "fm"),
    ("Moldova", "md"),
    ("Monaco", "mc"),
    ("Mongolia", "mn"),
    ("Montenegro", "me"),
    ("Morocco", "ma"),
    ("Mozambique", "mz"),
    ("Myanmar", "mm"),
    ("Namibia", "na"),
    ("Nauru", "nr"),
    ("Nepal", "np"),
    ("Netherlands", "nl"),
    ("New Zealand", "nz"),
    ("Nicaragua", "ni"),
    ("Niger", "ne"),
    ("Nigeria", "ng"),
    ("North Korea", "kp"),
    ("North Macedonia", "mk"),
    ("Norway", "no"),
    ("Oman", "om"),
    ("Pakistan", "pk"),
    ("Palau", "pw"),
    ("Palestine", "ps"),
    ("Panama", "pa"),
    ("Papua New Guinea", "pg"),
    ("Paraguay", "py"),
    ("Peru", "pe"),
    ("Philippines", "ph"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Puerto Rico", "pr"),
    ("Qatar", "qa"),
    ("Romania", "ro"),
    ("Russia", "ru"),
    ("Rwanda", "rw"),
    ("Saint Kitts and Nevis", "kn"),
    ("Saint Lucia", "lc"),
    ("Saint Vincent and the Grenadines", "vc"),
    ("Samoa", "ws"),
    ("San Marino", "sm"),
    ("Sao Tome and Principe", "st"),
    ("Saudi Arabia", "sa"),
    ("Senegal", "sn"),
    ("Serbia", "rs"),
    ("Seychelles", "sc"),
    ("Sierra Leone", "sl"),
    ("Singapore", "sg"),
    ("Slovakia", "sk"),
    ("Slovenia", "si"),
    ("Solomon Islands", "sb"),
    ("Somalia", "so"),
    ("South Africa", "za"),
    ("South Korea", "kr"),
    ("South Sudan", "ss"),
    ("Spain", "es"),
    ("Sri Lanka", "lk"),
    ("Sudan", "sd"),
    ("Suriname", "sr"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Syria", "sy"),
    ("Taiwan", "tw"),
    ("Tajikistan", "tj"),
    ("Tanzania", "tz"),
    ("Thailand", "th"),
    ("Timor-Leste", "tl"),
    ("Togo", "tg"),
    ("Tonga", "to"),
    ("Trinidad and Tobago", "tt"),
    ("Tunisia", "tn"),
    ("Turkey", "tr"),
    ("Turkmenistan", "tm"),
    ("Tuvalu", "tv"),
    ("Uganda", "ug"),
    ("Ukraine", "ua"),
    ("United Arab Emirates", "ae"),
    ("United Kingdom", "gb"),
    ("United States", "us"),
    ("Uruguay", "uy"),
    ("Uzbekistan", "uz"),
    ("Vanuatu", "vu"),
    ("Vatican City", "va"),
    ("Venezuela", "ve"),
    ("Vietnam", "vn"),
    ("Yemen", "ye"),
    ("Zambia", "zm"),
    ("Zimbabwe", "zw"),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRIES.iter().copied().collect());

/// Exact-match lookup of a country name. No fuzzy matching, no case folding.
pub fn region_code(name: &str) -> Option<&'static str> {
    BY_NAME.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve_deterministically() {
        assert_eq!(region_code("India"), Some("in"));
        assert_eq!(region_code("India"), Some("in"));
        assert_eq!(region_code("United States"), Some("us"));
        assert_eq!(region_code("United Kingdom"), Some("gb"));
    }

    #[test]
    fn unknown_names_have_no_code() {
        assert_eq!(region_code("Atlantis"), None);
        assert_eq!(region_code(""), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(region_code("india"), None);
    }

    #[test]
    fn registry_has_no_duplicate_names() {
        assert_eq!(BY_NAME.len(), COUNTRIES.len());
    }
}
