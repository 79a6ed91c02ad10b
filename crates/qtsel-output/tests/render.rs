use std::collections::BTreeMap;

use qtsel_model::{Host, PackageRecord, QtVersion, Target};
use qtsel_output::{
    OutputFormat, RenderConfig, SELECT_ARCHITECTURE, render_aqt_command,
    render_install_qt_action, render_official_installer,
};
use qtsel_state::{ActionVersion, CompositeState, ToolData};

fn v620() -> QtVersion {
    QtVersion::new(6, 2, 0)
}

fn package(name: &str, version: &str, archives: &[(&str, &str)]) -> PackageRecord {
    PackageRecord {
        name: name.to_string(),
        version: version.to_string(),
        downloadable_archives: archives.iter().map(|(a, _)| format!("{a}.7z")).collect(),
        archive_sizes: archives
            .iter()
            .map(|(a, s)| (a.to_string(), s.to_string()))
            .collect(),
        ..PackageRecord::default()
    }
}

fn ifw() -> ToolData {
    ToolData::loaded(
        "tools_ifw",
        vec![
            package("qt.tools.ifw.46", "4.6.1-0-202307060726", &[("installerbase", "1")]),
            package("qt.tools.ifw.47", "4.7.0-0-202401311154", &[("installerbase", "2")]),
        ],
    )
}

fn versions_loaded(host: Host) -> CompositeState {
    CompositeState::new(host, Target::Desktop).versions_tools_loaded(
        vec![vec![QtVersion::new(6, 1, 0)], vec![v620()]],
        vec!["tools_ifw".to_string()],
    )
}

fn with_ifw_47(state: CompositeState) -> CompositeState {
    state
        .add_tool("tools_ifw")
        .tool_variants_loaded(ifw())
        .set_tool_variant("tools_ifw", "qt.tools.ifw.47", true)
}

fn complete(host: Host, arch: &str) -> CompositeState {
    let state = versions_loaded(host)
        .set_version(Some(v620()))
        .arches_loaded(vec![arch.to_string(), "win64_mingw81".to_string()])
        .set_architecture(Some(arch.to_string()))
        .modules_archives_loaded(
            vec![
                package(
                    &format!("qt.qt6.620.addons.qtcharts.{arch}"),
                    "6.2.0-0-202109271104",
                    &[("qtcharts", "1203456")],
                ),
                package(
                    &format!("qt.qt6.620.addons.qtpositioning.{arch}"),
                    "6.2.0-0-202109271104",
                    &[("qtpositioning", "1025000"), ("qtlocation", "2204000")],
                ),
            ],
            BTreeMap::from([
                ("d3dcompiler_47".to_string(), "1612876".to_string()),
                ("qtbase".to_string(), "38014223".to_string()),
                ("qtsvg".to_string(), "345123".to_string()),
            ]),
        )
        .set_module(&format!("qt.qt6.620.addons.qtpositioning.{arch}"), true)
        .set_archive("qtsvg", false);
    with_ifw_47(state)
}

#[test]
fn nothing_selected_asks_for_a_version_or_tool_in_every_format() {
    let state = versions_loaded(Host::Windows);
    let config = RenderConfig::default();
    for format in OutputFormat::ALL {
        let text = format.render(&state, &config);
        assert!(
            text.contains("select a version or a tool"),
            "{}: {text}",
            format.title()
        );
    }
}

#[test]
fn version_without_architecture_asks_for_architecture() {
    let state = versions_loaded(Host::Windows)
        .set_version(Some(v620()))
        .arches_loaded(vec!["win64_mingw81".to_string(), "win64_msvc2019_64".to_string()]);
    let config = RenderConfig::default();
    for format in OutputFormat::ALL {
        assert_eq!(format.render(&state, &config), SELECT_ARCHITECTURE);
    }
}

#[test]
fn selected_tool_without_version_is_tools_only() {
    let state = with_ifw_47(versions_loaded(Host::Linux));
    let config = RenderConfig::default();

    assert_eq!(
        render_aqt_command(&state, &config),
        "aqt install-tool linux desktop tools_ifw qt.tools.ifw.47"
    );
    assert_eq!(
        render_install_qt_action(&state, &config),
        "    - name: Install Qt\n      uses: jurplel/install-qt-action@v4\n      with:\n        tools-only: 'true'\n        host: 'linux'\n        target: 'desktop'\n        tools: 'tools_ifw,qt.tools.ifw.47'"
    );
    assert_eq!(
        render_official_installer(&state, &config),
        "curl -L -O https://download.qt.io/official_releases/online_installers/qt-unified-linux-x64-online.run\n\
         chmod u+x qt-unified-linux-x64-online.run\n\
         ./qt-unified-linux-x64-online.run \\\n    \
         --accept-licenses \\\n    \
         --default-answer \\\n    \
         --confirm-command \\\n    \
         install \\\n    \
         qt.tools.ifw.47"
    );
}

#[test]
fn tools_only_wins_over_missing_architecture() {
    let state = with_ifw_47(versions_loaded(Host::Linux)).set_version(Some(v620()));
    let config = RenderConfig::default();
    for format in OutputFormat::ALL {
        let text = format.render(&state, &config);
        assert_ne!(text, SELECT_ARCHITECTURE);
        assert!(text.contains("qt.tools.ifw.47"), "{}: {text}", format.title());
    }
}

#[test]
fn all_variants_install_the_whole_tool() {
    let state = with_ifw_47(versions_loaded(Host::Linux))
        .toggle_tool_variants("tools_ifw", true);
    let config = RenderConfig::default();
    assert_eq!(
        render_aqt_command(&state, &config),
        "aqt install-tool linux desktop tools_ifw"
    );
    assert!(render_install_qt_action(&state, &config).contains("tools: 'tools_ifw'"));
}

#[test]
fn full_aqt_command() {
    let state = complete(Host::Windows, "win64_msvc2019_64");
    insta::assert_snapshot!("aqt_full", render_aqt_command(&state, &RenderConfig::default()));
}

#[test]
fn aqt_module_and_archive_flags() {
    let config = RenderConfig::default();
    let state = complete(Host::Windows, "win64_msvc2019_64")
        .remove_tool("tools_ifw")
        .toggle_modules(true)
        .toggle_archives(true);
    assert_eq!(
        render_aqt_command(&state, &config),
        "aqt install-qt windows desktop 6.2.0 win64_msvc2019_64 -m all"
    );

    let state = state.toggle_modules(false).toggle_archives(false);
    assert_eq!(
        render_aqt_command(&state, &config),
        "aqt install-qt windows desktop 6.2.0 win64_msvc2019_64 --noarchives"
    );
}

#[test]
fn full_action_step() {
    let state = complete(Host::Windows, "win64_msvc2019_64");
    let expected = "    - name: Install Qt
      uses: jurplel/install-qt-action@v4
      with:
        version: '6.2.0'
        host: 'windows'
        target: 'desktop'
        arch: 'win64_msvc2019_64'
        modules: 'qtpositioning'
        tools: 'tools_ifw,qt.tools.ifw.47'
        archives: 'd3dcompiler_47 qtbase'";
    assert_eq!(
        render_install_qt_action(&state, &RenderConfig::default()),
        expected
    );
}

#[test]
fn v2_action_step_pins_tool_versions_and_drops_archives() {
    let state = complete(Host::Windows, "win64_msvc2019_64").set_action_version(ActionVersion::V2);
    let text = render_install_qt_action(&state, &RenderConfig::default());
    assert!(text.contains("uses: jurplel/install-qt-action@v2"));
    assert!(text.contains("tools: 'tools_ifw,4.7.0-0-202401311154,qt.tools.ifw.47'"));
    assert!(!text.contains("archives:"));
}

#[test]
fn v2_tools_only_step_keeps_tools_only_flag() {
    let state = with_ifw_47(versions_loaded(Host::Linux)).set_action_version(ActionVersion::V2);
    let text = render_install_qt_action(&state, &RenderConfig::default());
    assert_eq!(
        text,
        "    - name: Install Qt\n      uses: jurplel/install-qt-action@v2\n      with:\n        tools-only: 'true'\n        host: 'linux'\n        target: 'desktop'\n        tools: 'tools_ifw,4.7.0-0-202401311154,qt.tools.ifw.47'"
    );
    assert!(!ActionVersion::V2.supports_archives());
    assert!(!text.contains("archives:"));
}

#[test]
fn full_windows_installer_script() {
    let state = complete(Host::Windows, "win64_msvc2019_64");
    insta::assert_snapshot!(
        "official_windows",
        render_official_installer(&state, &RenderConfig::default())
    );
}

#[test]
fn mac_installer_mounts_the_disk_image() {
    let state = complete(Host::Mac, "clang_64");
    let script = render_official_installer(&state, &RenderConfig::default());
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(
        lines[..3],
        [
            "curl -L -O https://download.qt.io/official_releases/online_installers/qt-unified-macOS-x64-online.dmg",
            "hdiutil attach qt-unified-macOS-x64-online.dmg",
            "/Volumes/qt-unified-macOS-x64-online/qt-unified-macOS-x64-online.app/Contents/MacOS/qt-unified-macOS-x64-online \\",
        ]
    );
    assert_eq!(lines.last(), Some(&"    qt.tools.ifw.47"));
    assert!(lines.contains(&"    qt.qt6.620.clang_64 \\"));
}
