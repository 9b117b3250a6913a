use super::{IntlError, IntlKey, Translate};
use fluent::{FluentBundle, FluentResource};
use fluent_langneg::negotiate_languages;
use std::collections::HashMap;
use unic_langid::{langid, LanguageIdentifier};

const EN_US: LanguageIdentifier = langid!("en-US");
const ZH_CN: LanguageIdentifier = langid!("zh-CN");
const DE: LanguageIdentifier = langid!("de");
const NUM_FTLS: usize = 3;

const EN_US_NATIVE_NAME: &str = "English (US)";
const ZH_CN_NATIVE_NAME: &str = "简体中文";
const DE_NATIVE_NAME: &str = "Deutsch";

struct StaticBundle {
    identifier: LanguageIdentifier,
    ftl: &'static str,
}

static FTLS: [StaticBundle; NUM_FTLS] = [
    StaticBundle {
        identifier: EN_US,
        ftl: include_str!("../../../../assets/translations/en-US/main.ftl"),
    },
    StaticBundle {
        identifier: ZH_CN,
        ftl: include_str!("../../../../assets/translations/zh-CN/main.ftl"),
    },
    StaticBundle {
        identifier: DE,
        ftl: include_str!("../../../../assets/translations/de/main.ftl"),
    },
];

type Bundle = FluentBundle<FluentResource>;

/// Manages localization resources and provides localized strings
pub struct Localization {
    /// Current locale
    current_locale: LanguageIdentifier,
    /// Available locales
    available_locales: Vec<LanguageIdentifier>,
    /// Fallback locale
    fallback_locale: LanguageIdentifier,
    /// Native names for locales
    locale_native_names: HashMap<LanguageIdentifier, String>,

    /// Cached string results per locale
    string_cache: HashMap<LanguageIdentifier, HashMap<String, String>>,
    /// Bundles
    bundles: HashMap<LanguageIdentifier, Bundle>,

    use_isolating: bool,
}

impl Default for Localization {
    fn default() -> Self {
        let available_locales = vec![EN_US.clone(), ZH_CN.clone(), DE.clone()];

        let locale_native_names = HashMap::from([
            (EN_US, EN_US_NATIVE_NAME.to_owned()),
            (ZH_CN, ZH_CN_NATIVE_NAME.to_owned()),
            (DE, DE_NATIVE_NAME.to_owned()),
        ]);

        Self {
            current_locale: EN_US.clone(),
            available_locales,
            fallback_locale: EN_US.clone(),
            locale_native_names,
            use_isolating: true,
            string_cache: HashMap::new(),
            bundles: HashMap::new(),
        }
    }
}

impl Localization {
    pub fn new() -> Self {
        Localization::default()
    }

    /// Disable bidirectional isolation markers. mostly useful for tests
    pub fn no_bidi() -> Self {
        Localization {
            use_isolating: false,
            ..Localization::default()
        }
    }

    /// Load a fluent bundle given a language identifier. Only looks in the static
    /// ftl files baked into the binary
    fn load_bundle(lang: &LanguageIdentifier) -> Result<Bundle, IntlError> {
        let Some(ftl) = FTLS.iter().find(|ftl| &ftl.identifier == lang) else {
            return Err(IntlError::NoFtl(lang.to_owned()));
        };

        let mut bundle = FluentBundle::new(vec![lang.to_owned()]);
        let resource = match FluentResource::try_new(ftl.ftl.to_string()) {
            Ok(resource) => {
                tracing::debug!("loaded {} bundle", lang);
                resource
            }
            Err((resource, errors)) => {
                for error in errors {
                    tracing::error!("load_bundle ({lang}): {error}");
                }
                tracing::warn!("load_bundle ({}): loading bundle with errors", lang);
                resource
            }
        };

        if let Err(errs) = bundle.add_resource(resource) {
            for err in errs {
                tracing::error!("adding resource ({lang}): {err}");
            }
        }

        Ok(bundle)
    }

    fn ensure_bundle(&mut self, lang: &LanguageIdentifier) -> Result<(), IntlError> {
        if self.bundles.contains_key(lang) {
            return Ok(());
        }

        let mut bundle = Self::load_bundle(lang)?;
        if !self.use_isolating {
            bundle.set_use_isolating(false);
        }
        self.bundles.insert(lang.to_owned(), bundle);
        Ok(())
    }

    fn format(&mut self, lang: &LanguageIdentifier, id: IntlKey<'_>) -> Result<String, IntlError> {
        self.ensure_bundle(lang)?;

        let ftl_id = id.ftl_id();
        let Some(bundle) = self.bundles.get(lang) else {
            return Err(IntlError::NoFtl(lang.to_owned()));
        };

        let message = bundle
            .get_message(&ftl_id)
            .ok_or_else(|| IntlError::NotFound(id.to_owned()))?;

        let pattern = message
            .value()
            .ok_or_else(|| IntlError::NoValue(id.to_owned()))?;

        let mut errors = Vec::with_capacity(0);
        let result = bundle.format_pattern(pattern, None, &mut errors);

        if !errors.is_empty() {
            tracing::warn!("Localization errors for {}: {:?}", id, &errors);
        }

        Ok(result.to_string())
    }

    /// Gets a localized string in the current locale, falling back to the
    /// fallback locale when the current one lacks the message
    pub fn get_string(&mut self, id: IntlKey<'_>) -> Result<String, IntlError> {
        let locale = self.current_locale.clone();
        if let Some(cached) = self
            .string_cache
            .get(&locale)
            .and_then(|c| c.get(id.as_str()))
        {
            return Ok(cached.clone());
        }

        let result = match self.format(&locale, id) {
            Ok(s) => s,
            Err(err) if locale != self.fallback_locale => {
                tracing::debug!("{err} in {locale}, trying {}", self.fallback_locale);
                let fallback = self.fallback_locale.clone();
                self.format(&fallback, id)?
            }
            Err(err) => return Err(err),
        };

        self.cache_string(locale, id, &result);
        Ok(result)
    }

    fn cache_string(&mut self, locale: LanguageIdentifier, id: IntlKey<'_>, result: &str) {
        tracing::trace!("Cached string result for '{}' in locale: {}", id, &locale);
        let locale_cache = self.string_cache.entry(locale).or_default();
        locale_cache.insert(id.as_str().to_owned(), result.to_owned());
    }

    /// Sets the current locale
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> Result<(), IntlError> {
        if !self.available_locales.contains(&locale) {
            tracing::error!(
                "Locale {} is not available. Available locales: {:?}",
                locale,
                self.available_locales
            );
            return Err(IntlError::LocaleNotAvailable(locale));
        }

        tracing::info!(
            "Switching locale from {} to {}",
            &self.current_locale,
            &locale
        );
        self.current_locale = locale;

        // Clear caches when locale changes since they are locale-specific
        self.string_cache.clear();

        Ok(())
    }

    /// Parse and set a locale given as a string, e.g. from settings
    pub fn set_locale_str(&mut self, locale: &str) -> Result<(), IntlError> {
        let parsed: LanguageIdentifier = locale
            .parse()
            .map_err(|e| IntlError::LocaleParse(locale.to_owned(), format!("{e}")))?;
        self.set_locale(parsed)
    }

    pub fn get_current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn get_available_locales(&self) -> &[LanguageIdentifier] {
        &self.available_locales
    }

    pub fn get_locale_native_name(&self, locale: &LanguageIdentifier) -> Option<&str> {
        self.locale_native_names.get(locale).map(|s| s.as_str())
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        CacheStats {
            resource_cache_size: self.bundles.len(),
            string_cache_size: self.string_cache.values().map(|c| c.len()).sum(),
            cached_locales: self.bundles.keys().cloned().collect(),
        }
    }

    /// Negotiates the best locale from a list of preferred locales
    pub fn negotiate_locale(&self, preferred: &[LanguageIdentifier]) -> LanguageIdentifier {
        let available = self.available_locales.clone();
        let negotiated = negotiate_languages(
            preferred,
            &available,
            Some(&self.fallback_locale),
            fluent_langneg::NegotiationStrategy::Filtering,
        );
        negotiated
            .first()
            .map_or(self.fallback_locale.clone(), |v| (*v).clone())
    }
}

impl Translate for Localization {
    fn translate(&mut self, key: IntlKey<'_>) -> String {
        match self.get_string(key) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!("FALLBACK: using key '{}' as string ({err})", key);
                key.as_str().to_owned()
            }
        }
    }
}

/// Statistics about cache usage
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub resource_cache_size: usize,
    pub string_cache_size: usize,
    pub cached_locales: Vec<LanguageIdentifier>,
}
