use std::collections::BTreeSet;

use comment_blocks_domain::{
    BLADE, ContinuationEngine, DefaultRules, Installation, LanguageConfiguration, MultiLineLanguageDefinitions,
    Settings, SingleLineLanguageDefinitions, SingleLineStyle, compose,
    language::{CharacterPair, CommentRule},
};
use comment_blocks_ports::{
    artifacts::ArtifactSink,
    catalog::{ExtensionCatalog, ExtensionIdentity},
    host::{HostCommands, LanguageConfigurationHost, Notifier, Registration},
    json::JsonSource,
    settings::SettingsStore,
};
use comment_blocks_shared_kernel::{ApplicationError, CommentBlocksError, ErrorContext, LanguageId, Result};
use tracing::{debug, error, info};

use crate::registry::LanguageRegistry;

pub const OPEN_LOG: &str = "Open Log";

/// Every host collaborator the configurator talks to.
#[derive(Clone, Copy)]
pub struct HostPorts<'a> {
    pub catalog: &'a dyn ExtensionCatalog,
    pub json: &'a dyn JsonSource,
    pub host: &'a dyn LanguageConfigurationHost,
    pub settings: &'a dyn SettingsStore,
    pub notifier: &'a dyn Notifier,
    pub commands: &'a dyn HostCommands,
    pub artifacts: &'a dyn ArtifactSink,
}

/// One language installed by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledLanguage {
    pub language: LanguageId,
    pub multi_line: bool,
    pub style: Option<SingleLineStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub installed: Vec<InstalledLanguage>,
}

impl BuildReport {
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.installed.iter().map(|entry| &entry.language)
    }
}

/// Owns the language registry and every live installation.
///
/// A rebuild always starts from scratch: previous installations are disposed,
/// the registry is reloaded and classified again, and the result is installed.
pub struct Configurator<'a> {
    ports: HostPorts<'a>,
    identity: ExtensionIdentity,
    defaults: DefaultRules,
    engine: ContinuationEngine,
    settings: Settings,
    registry: LanguageRegistry,
    installations: Vec<(LanguageId, Box<dyn Registration>)>,
}

impl<'a> Configurator<'a> {
    pub fn new(ports: HostPorts<'a>, identity: ExtensionIdentity) -> Result<Self> {
        Ok(Self {
            ports,
            identity,
            defaults: DefaultRules::compile()?,
            engine: ContinuationEngine::new()?,
            settings: Settings::default(),
            registry: LanguageRegistry::default(),
            installations: Vec::new(),
        })
    }

    pub fn ports(&self) -> HostPorts<'a> {
        self.ports
    }

    pub fn identity(&self) -> &ExtensionIdentity {
        &self.identity
    }

    pub fn engine(&self) -> &ContinuationEngine {
        &self.engine
    }

    /// The settings snapshot taken by the last build or refresh.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Languages with a live installation, in installation order.
    pub fn installed(&self) -> impl Iterator<Item = &LanguageId> {
        self.installations.iter().map(|(language, _)| language)
    }

    pub fn refresh_settings(&mut self) -> Result<&Settings> {
        self.settings = self.ports.settings.snapshot()?;
        Ok(&self.settings)
    }

    /// First build of the session.
    pub fn activate(&mut self) -> Result<BuildReport> {
        let report = self.configure()?;
        if !self.settings.disabled_languages.is_empty() {
            let ids: Vec<&str> = self.settings.disabled_languages.iter().map(LanguageId::as_str).collect();
            let message = format!("{} languages are disabled for {}.", ids.join(", "), self.identity.display_name);
            self.ports.notifier.show_information(&message, &[]);
        }
        Ok(report)
    }

    /// Rebuild with a fresh settings snapshot, reporting fatal errors to the user.
    pub fn configure(&mut self) -> Result<BuildReport> {
        let result = match self.refresh_settings() {
            Ok(_) => self.rebuild(),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            self.report_failure(err);
        }
        result
    }

    /// Dispose every installation, rebuild the registry and install it again.
    pub fn rebuild(&mut self) -> Result<BuildReport> {
        self.dispose_all();

        let registry = LanguageRegistry::load(self.ports.catalog, self.ports.json, &self.settings)?;
        let classification = registry.classification();
        self.ports
            .artifacts
            .write_single_line(&SingleLineLanguageDefinitions::from(&classification.single_line))
            .context("writing single-line language definitions")?;
        self.ports
            .artifacts
            .write_multi_line(&MultiLineLanguageDefinitions::from(&classification.multi_line))
            .context("writing multi-line language definitions")?;
        self.registry = registry;

        let mut report = BuildReport::default();
        for request in self.plan() {
            if let Err(err) = self.install(&request) {
                self.dispose_all();
                return Err(err);
            }
            report.installed.push(request);
        }
        info!(installed = report.installed.len(), "language configurations installed");
        Ok(report)
    }

    /// Single-line languages first (with their multi-line flag), then the
    /// remaining multi-line languages.
    fn plan(&self) -> Vec<InstalledLanguage> {
        let classification = self.registry.classification();
        let precedence = self.settings.single_line_style_precedence;
        let single: BTreeSet<&LanguageId> = classification.single_line.languages();

        let mut plan: Vec<InstalledLanguage> = single
            .iter()
            .map(|language| InstalledLanguage {
                language: (*language).clone(),
                multi_line: classification.multi_line.contains(language),
                style: classification.single_line.resolve(language, precedence),
            })
            .collect();
        plan.extend(
            classification
                .multi_line
                .languages()
                .into_iter()
                .filter(|language| !single.contains(language))
                .map(|language| InstalledLanguage { language: language.clone(), multi_line: true, style: None }),
        );
        plan
    }

    fn compose(&self, request: &InstalledLanguage) -> LanguageConfiguration {
        let installation =
            Installation { language: request.language.as_str(), multi_line: request.multi_line, style: request.style };
        compose(installation, self.registry.config(&request.language), &self.settings, &self.defaults)
    }

    fn install(&mut self, request: &InstalledLanguage) -> Result<()> {
        let config = self.compose(request);
        debug!(
            language = %request.language,
            multi_line = request.multi_line,
            style = ?request.style.map(SingleLineStyle::token),
            rules = config.on_enter_rules.as_ref().map_or(0, Vec::len),
            "installing language configuration"
        );
        self.register(&request.language, &config)
    }

    fn register(&mut self, language: &LanguageId, config: &LanguageConfiguration) -> Result<()> {
        let handle = self.ports.host.set_language_configuration(language, config).map_err(|err| {
            CommentBlocksError::from(ApplicationError::InstallationFailed {
                language: language.to_string(),
                reason: err.to_string(),
            })
        })?;
        self.installations.push((language.clone(), handle));
        Ok(())
    }

    /// Reinstall Blade with `pair` as its block comment, replacing any live
    /// Blade installation. A Blade the build did not plan gets a comments-only
    /// configuration.
    pub fn apply_blade_pair(&mut self, pair: CharacterPair) -> Result<()> {
        info!(open = %pair.0, close = %pair.1, "applying blade block comments");
        let config = match self.plan().into_iter().find(|request| request.language == BLADE) {
            Some(request) => {
                let mut config = self.compose(&request);
                config.comments.get_or_insert_with(CommentRule::default).block_comment = Some(pair);
                config
            }
            None => LanguageConfiguration::with_block_comment(pair),
        };

        let (previous, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.installations).into_iter().partition(|(language, _)| *language == BLADE);
        self.installations = rest;
        if let Err(err) = self.register(&LanguageId::from(BLADE), &config) {
            self.installations.extend(previous);
            return Err(err);
        }
        for (_, handle) in previous {
            handle.dispose();
        }
        Ok(())
    }

    /// Forget every installation without disposing it, leaving whatever the
    /// host holds in place once this configurator is dropped.
    pub fn detach(&mut self) -> usize {
        let count = self.installations.len();
        self.installations.clear();
        debug!(count, "installations detached");
        count
    }

    pub fn dispose_all(&mut self) {
        let count = self.installations.len();
        for (_, handle) in self.installations.drain(..) {
            handle.dispose();
        }
        if count > 0 {
            debug!(count, "disposed previous installations");
        }
    }

    fn report_failure(&self, err: &CommentBlocksError) {
        error!(error = %err, chain = ?err, "configuration build failed");
        let category = failing_category(err).unwrap_or("configuration");
        let message = format!(
            "{}: failed to load {category}. Nothing was configured; see the log for details.",
            self.identity.display_name
        );
        if self.ports.notifier.show_error(&message, &[OPEN_LOG]).as_deref() == Some(OPEN_LOG) {
            if let Err(err) = self.ports.commands.show_log() {
                error!(error = %err, "could not open the log");
            }
        }
    }
}

impl Drop for Configurator<'_> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

fn failing_category(err: &CommentBlocksError) -> Option<&str> {
    match err {
        CommentBlocksError::Application(ApplicationError::ConfigurationLoadFailed { category, .. }) => Some(category),
        CommentBlocksError::Context { source, .. } => failing_category(source),
        _ => None,
    }
}
