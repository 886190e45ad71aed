// tests/rebuild.rs
mod common;

use assert_cmd::Command;
use comment_blocks::{app::Session, args::GlobalArgs};
use common::{NAMESPACE, Workspace, exists};

fn global(workspace: &Workspace) -> GlobalArgs {
    GlobalArgs {
        debug: false,
        install_path: workspace.path("install"),
        settings: Some(workspace.path("settings.json")),
        app_root: None,
        user_extensions: Some(workspace.path("extensions")),
    }
}

fn configure(workspace: &Workspace) -> Command {
    let mut command = workspace.command();
    command.arg("configure").arg("--out").arg(workspace.out());
    command
}

#[test]
fn rebuild_removes_files_of_dropped_languages() {
    let workspace = Workspace::new();
    let session = Session::open(&global(&workspace), Some(workspace.out())).expect("opens");
    let mut configurator = session.configurator().expect("creates");

    configurator.configure().expect("first build");
    assert!(exists(&workspace.path("out/languages/python.json")));

    workspace.settings(&format!(r#"{{ "{NAMESPACE}.disabledLanguages": ["python"] }}"#));
    configurator.configure().expect("rebuild");

    assert!(!exists(&workspace.path("out/languages/python.json")));
    assert!(exists(&workspace.path("out/languages/rust.json")));
    assert_eq!(session.host().clear().expect("clears"), 1);
}

#[test]
fn dropping_the_configurator_removes_what_it_installed() {
    let workspace = Workspace::new();
    let session = Session::open(&global(&workspace), Some(workspace.out())).expect("opens");
    {
        let mut configurator = session.configurator().expect("creates");
        configurator.configure().expect("builds");
        assert!(exists(&workspace.path("out/languages/rust.json")));
    }
    assert!(!exists(&workspace.path("out/languages/rust.json")));
}

#[test]
fn configure_again_clears_languages_no_longer_configured() {
    let workspace = Workspace::new();
    configure(&workspace).assert().success();
    assert!(exists(&workspace.path("out/languages/python.json")));

    workspace.settings(&format!(r#"{{ "{NAMESPACE}.disabledLanguages": ["python"] }}"#));
    configure(&workspace).assert().success();

    assert!(!exists(&workspace.path("out/languages/python.json")));
    assert!(exists(&workspace.path("out/languages/rust.json")));
}
