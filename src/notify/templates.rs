//! Built-in Tera templates for the outbound order message
//!
//! Both templates render against [`super::OrderSummary`]. A [`FormConfig`]
//! may replace either of them.
//!
//! [`FormConfig`]: crate::config::FormConfig

pub const SUBJECT_TEMPLATE_NAME: &str = "subject";
pub const BODY_TEMPLATE_NAME: &str = "body";

pub const DEFAULT_SUBJECT: &str = "Poptávka dortu - {{ customer.name }}";

pub const DEFAULT_BODY: &str = r#"NOVÁ POPTÁVKA DORTU
---------------------
Zákazník: {{ customer.name }}
Telefon: {{ customer.phone }}
Email: {{ customer.email }}

Datum vyzvednutí: {{ pickup_date }}
Místo: {{ location }}

DORT
----
Tvar: {{ shape }}
Patra: {{ tiers }}
Rozměry: {{ sizes }} cm{% if custom_size_note %} (Pozn: {{ custom_size_note }}){% endif %}

Korpus: {{ sponge }}
Náplň: {{ filling }}
Povrch: {{ surface }}
{% if edible_print %}
!!! DŮLEŽITÉ !!!
Zákazník zvolil jedlý tisk. Obrázek pro tisk pošlete prosím jako přílohu tohoto emailu.
{% endif %}
Nápis: {{ inscription }}
Množství: {{ quantity }} ks

Poznámky:
{{ specifications }}
"#;
