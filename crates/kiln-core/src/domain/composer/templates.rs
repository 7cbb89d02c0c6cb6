//! Per-framework template table.
//!
//! One [`TemplateDef`] per framework id. A template knows its import syntax,
//! its bootstrap pattern, and which wrapper kinds it can nest around the
//! application root. Frameworks without an entry fall back to the generic
//! template, which nests nothing.
//!
//! Every template writes the shared [`Composition::preamble`] right after
//! its imports and uses [`Source::nest`] for the wrapper block, so the
//! nesting order is identical everywhere.

use super::{Composition, Source};
use crate::domain::value_objects::WrapperKind;

/// A framework-specific render function plus its wrapper capabilities.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    pub framework_id: &'static str,

    /// Wrapper kinds this template can nest. Selected kinds outside this
    /// list are rendered as marker lines instead.
    pub wraps: &'static [WrapperKind],

    render: fn(&Composition<'_>, &mut Source),
}

impl TemplateDef {
    pub fn supports(&self, kind: WrapperKind) -> bool {
        self.wraps.contains(&kind)
    }

    pub fn render(&self, composition: &Composition<'_>, src: &mut Source) {
        (self.render)(composition, src);
    }
}

const ALL_WRAPPERS: &[WrapperKind] = &WrapperKind::NESTING_ORDER;

static TEMPLATES: &[TemplateDef] = &[
    TemplateDef {
        framework_id: "react",
        wraps: ALL_WRAPPERS,
        render: react,
    },
    TemplateDef {
        framework_id: "vue",
        wraps: ALL_WRAPPERS,
        render: vue,
    },
    TemplateDef {
        framework_id: "angular",
        wraps: ALL_WRAPPERS,
        render: angular,
    },
    TemplateDef {
        framework_id: "svelte",
        wraps: ALL_WRAPPERS,
        render: svelte,
    },
    TemplateDef {
        framework_id: "next",
        wraps: ALL_WRAPPERS,
        render: next,
    },
    TemplateDef {
        framework_id: "flutter",
        wraps: ALL_WRAPPERS,
        render: flutter,
    },
    TemplateDef {
        framework_id: "react-native",
        wraps: ALL_WRAPPERS,
        render: react_native,
    },
    TemplateDef {
        framework_id: "ionic",
        wraps: ALL_WRAPPERS,
        render: ionic,
    },
    TemplateDef {
        framework_id: "electron",
        wraps: &[],
        render: electron,
    },
    TemplateDef {
        framework_id: "tauri",
        wraps: ALL_WRAPPERS,
        render: tauri,
    },
];

static GENERIC: TemplateDef = TemplateDef {
    framework_id: "*",
    wraps: &[],
    render: generic,
};

/// Template for `framework_id`, or the generic fallback.
pub fn template_for(framework_id: &str) -> &'static TemplateDef {
    TEMPLATES
        .iter()
        .find(|def| def.framework_id == framework_id)
        .unwrap_or(&GENERIC)
}

// ── Shared naming ────────────────────────────────────────────────────────────

/// Component name used by the JSX family (React, Next.js, React Native, Ionic).
fn provider(kind: WrapperKind) -> &'static str {
    match kind {
        WrapperKind::Theme => "ThemeProvider",
        WrapperKind::Auth => "AuthProvider",
        WrapperKind::Database => "DatabaseProvider",
    }
}

fn jsx_imports(cx: &Composition<'_>, src: &mut Source, base: &str) {
    for kind in cx.wrappers() {
        src.line(
            0,
            format!("import {{ {} }} from '{base}/{}';", provider(*kind), kind.as_str()),
        );
    }
}

fn jsx_tags(kind: WrapperKind) -> (String, String) {
    let name = provider(kind);
    (format!("<{name}>"), format!("</{name}>"))
}

fn call_layer(open: String) -> (String, String) {
    (open, ")".to_string())
}

/// `#RRGGBB` as a Dart `0xAARRGGBB` literal (opaque).
fn argb(color: &str) -> String {
    let hex = color.trim().trim_start_matches('#').to_ascii_uppercase();
    if hex.len() == 6 {
        format!("0xFF{hex}")
    } else {
        format!("0x{hex}")
    }
}

/// Escape for a single-quoted string literal.
fn quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

// ── Website ──────────────────────────────────────────────────────────────────

fn react(cx: &Composition<'_>, src: &mut Source) {
    src.lines(
        0,
        [
            "import React from 'react';",
            "import ReactDOM from 'react-dom/client';",
            "import App from './App';",
        ],
    );
    jsx_imports(cx, src, ".");
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "const root = ReactDOM.createRoot(document.getElementById('root'));");
    src.line(0, "root.render(");
    src.line(2, "<React.StrictMode>");
    src.nest(4, ("", ""), cx.wrappers(), jsx_tags, "<App />");
    src.line(2, "</React.StrictMode>");
    src.line(0, ");");
}

fn vue(cx: &Composition<'_>, src: &mut Source) {
    src.lines(0, ["import { createApp, h } from 'vue';", "import App from './App.vue';"]);
    for kind in cx.wrappers() {
        let name = provider(*kind);
        src.line(0, format!("import {name} from './providers/{name}.vue';"));
    }
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "const app = createApp({");
    src.line(2, "render: () => (");
    src.nest(
        4,
        ("", ""),
        cx.wrappers(),
        |kind| call_layer(format!("h({}, null, () =>", provider(kind))),
        "h(App)",
    );
    src.line(2, "),");
    src.line(0, "});");
    src.blank();
    src.line(0, "app.mount('#app');");
}

fn angular(cx: &Composition<'_>, src: &mut Source) {
    fn component(kind: WrapperKind) -> String {
        format!("{}Component", provider(kind))
    }
    fn selector(kind: WrapperKind) -> String {
        format!("app-{}-provider", kind.as_str())
    }

    src.lines(
        0,
        [
            "import { Component } from '@angular/core';",
            "import { bootstrapApplication } from '@angular/platform-browser';",
            "import { ShellComponent } from './app/shell.component';",
        ],
    );
    for kind in cx.wrappers() {
        src.line(
            0,
            format!(
                "import {{ {} }} from './app/{kind}/{}.component';",
                component(*kind),
                selector(*kind).trim_start_matches("app-")
            ),
        );
    }
    src.blank();
    cx.preamble(src, 0);

    let imports: Vec<_> = cx
        .wrappers()
        .iter()
        .map(|kind| component(*kind))
        .chain(std::iter::once("ShellComponent".to_string()))
        .collect();

    src.line(0, "@Component({");
    src.line(2, "selector: 'app-root',");
    src.line(2, "standalone: true,");
    src.line(2, format!("imports: [{}],", imports.join(", ")));
    src.line(2, "template: `");
    src.nest(
        4,
        ("", ""),
        cx.wrappers(),
        |kind| (format!("<{}>", selector(kind)), format!("</{}>", selector(kind))),
        "<app-shell></app-shell>",
    );
    src.line(2, "`,");
    src.line(0, "})");
    src.line(0, "export class AppComponent {}");
    src.blank();
    src.line(
        0,
        "bootstrapApplication(AppComponent).catch((err) => console.error(err));",
    );
}

fn svelte(cx: &Composition<'_>, src: &mut Source) {
    src.line(0, "<script>");
    src.line(2, "import Shell from './Shell.svelte';");
    for kind in cx.wrappers() {
        let name = provider(*kind);
        src.line(2, format!("import {name} from './providers/{name}.svelte';"));
    }
    src.blank();
    cx.preamble(src, 2);
    src.line(2, format!("export let title = '{}';", quoted(cx.project_name())));
    src.line(0, "</script>");
    src.blank();
    src.nest(0, ("", ""), cx.wrappers(), jsx_tags, "<Shell {title} />");
    src.blank();
    src.line(0, "<style>");
    src.line(2, ":global(:root) {");
    src.line(4, format!("--primary: {};", cx.options().primary_color));
    src.line(4, format!("--dark: {};", cx.options().dark_color));
    src.line(2, "}");
    src.line(0, "</style>");
}

fn next(cx: &Composition<'_>, src: &mut Source) {
    src.line(0, "// pages/_app.jsx");
    src.line(0, "import '../styles/globals.css';");
    jsx_imports(cx, src, "..");
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "function MyApp({ Component, pageProps }) {");
    src.line(2, "return (");
    src.nest(4, ("", ""), cx.wrappers(), jsx_tags, "<Component {...pageProps} />");
    src.line(2, ");");
    src.line(0, "}");
    src.blank();
    src.line(0, "export default MyApp;");
}

// ── Mobile ───────────────────────────────────────────────────────────────────

fn flutter(cx: &Composition<'_>, src: &mut Source) {
    fn widget(kind: WrapperKind) -> &'static str {
        match kind {
            WrapperKind::Theme => "ThemeScope",
            WrapperKind::Auth => "AuthGate",
            WrapperKind::Database => "DatabaseScope",
        }
    }
    fn file(kind: WrapperKind) -> &'static str {
        match kind {
            WrapperKind::Theme => "theme/theme_scope.dart",
            WrapperKind::Auth => "auth/auth_gate.dart",
            WrapperKind::Database => "database/database_scope.dart",
        }
    }

    let name = quoted(cx.project_name());
    let primary = argb(&cx.options().primary_color);
    let dark = argb(&cx.options().dark_color);
    let themed = cx.wraps(WrapperKind::Theme);

    src.line(0, "import 'package:flutter/material.dart';");
    for kind in cx.wrappers() {
        src.line(0, format!("import '{}';", file(*kind)));
    }
    src.blank();
    cx.preamble(src, 0);

    src.lines(
        0,
        [
            "void main() {",
            "  runApp(const MyApp());",
            "}",
            "",
            "class MyApp extends StatelessWidget {",
            "  const MyApp({super.key});",
            "",
            "  @override",
            "  Widget build(BuildContext context) {",
            "    return MaterialApp(",
        ],
    );
    src.line(6, format!("title: '{name}',"));
    src.line(6, "theme: ThemeData(");
    src.line(8, format!("primaryColor: const Color({primary}),"));
    src.line(8, "scaffoldBackgroundColor: Colors.white,");
    src.line(8, "useMaterial3: true,");
    src.line(6, "),");
    if themed {
        src.line(6, "darkTheme: ThemeData(");
        src.line(8, format!("primaryColor: const Color({primary}),"));
        src.line(8, format!("scaffoldBackgroundColor: const Color({dark}),"));
        src.line(8, "useMaterial3: true,");
        src.line(6, "),");
        src.line(6, "themeMode: ThemeMode.system,");
    } else {
        src.line(6, "darkTheme: null,");
        src.line(6, "themeMode: ThemeMode.light,");
    }
    src.nest(
        6,
        ("home: ", "child: "),
        cx.wrappers(),
        |kind| (format!("{}(", widget(kind)), "),".to_string()),
        &format!("const MyHomePage(title: '{name} Home Page'),"),
    );
    src.lines(
        0,
        [
            "    );",
            "  }",
            "}",
            "",
            "class MyHomePage extends StatelessWidget {",
            "  const MyHomePage({super.key, required this.title});",
            "",
            "  final String title;",
            "",
            "  @override",
            "  Widget build(BuildContext context) {",
            "    return Scaffold(",
            "      appBar: AppBar(",
            "        title: Text(title),",
            "        backgroundColor: Theme.of(context).primaryColor,",
            "      ),",
            "      body: const Center(",
            "        child: Text('Welcome to your new Flutter app!'),",
            "      ),",
            "    );",
            "  }",
            "}",
        ],
    );
}

fn react_native(cx: &Composition<'_>, src: &mut Source) {
    src.lines(
        0,
        [
            "import React from 'react';",
            "import { SafeAreaView, StyleSheet, Text, View } from 'react-native';",
        ],
    );
    jsx_imports(cx, src, "./src");
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "const MainScreen = () => (");
    src.line(2, "<SafeAreaView style={styles.container}>");
    src.line(4, "<View style={styles.header}>");
    src.line(6, format!("<Text style={{styles.headerText}}>{}</Text>", cx.project_name()));
    src.line(4, "</View>");
    src.line(4, "<View style={styles.content}>");
    src.line(
        6,
        "<Text style={styles.welcomeText}>Welcome to your new React Native app!</Text>",
    );
    src.line(4, "</View>");
    src.line(2, "</SafeAreaView>");
    src.line(0, ");");
    src.blank();
    src.line(0, "const App = () => {");
    src.line(2, "return (");
    src.nest(4, ("", ""), cx.wrappers(), jsx_tags, "<MainScreen />");
    src.line(2, ");");
    src.line(0, "};");
    src.blank();
    src.line(0, "const styles = StyleSheet.create({");
    src.line(2, "container: { flex: 1, backgroundColor: '#FFFFFF' },");
    src.line(
        2,
        format!(
            "header: {{ backgroundColor: '{}', padding: 20, alignItems: 'center' }},",
            cx.options().primary_color
        ),
    );
    src.line(
        2,
        format!(
            "headerText: {{ fontSize: 24, fontWeight: 'bold', color: '{}' }},",
            cx.options().dark_color
        ),
    );
    src.line(
        2,
        "content: { flex: 1, justifyContent: 'center', alignItems: 'center', padding: 20 },",
    );
    src.line(2, "welcomeText: { fontSize: 18, textAlign: 'center' },");
    src.line(0, "});");
    src.blank();
    src.line(0, "export default App;");
}

fn ionic(cx: &Composition<'_>, src: &mut Source) {
    src.lines(
        0,
        [
            "import React from 'react';",
            "import { createRoot } from 'react-dom/client';",
            "import { IonApp, setupIonicReact } from '@ionic/react';",
            "import App from './App';",
        ],
    );
    jsx_imports(cx, src, ".");
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "setupIonicReact();");
    src.blank();
    src.line(0, "const root = createRoot(document.getElementById('root')!);");
    src.line(0, "root.render(");
    src.line(2, "<IonApp>");
    src.nest(4, ("", ""), cx.wrappers(), jsx_tags, "<App />");
    src.line(2, "</IonApp>");
    src.line(0, ");");
}

// ── Desktop ──────────────────────────────────────────────────────────────────

/// Electron's main process has no component tree to nest into, so every
/// feature arrives here as a marker.
fn electron(cx: &Composition<'_>, src: &mut Source) {
    src.lines(
        0,
        [
            "// main.js",
            "const { app, BrowserWindow } = require('electron');",
            "const path = require('path');",
        ],
    );
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "function createWindow() {");
    src.line(2, "const mainWindow = new BrowserWindow({");
    src.line(4, "width: 800,");
    src.line(4, "height: 600,");
    src.line(4, format!("title: '{}',", quoted(cx.project_name())));
    src.line(4, format!("backgroundColor: '{}',", cx.options().dark_color));
    src.line(4, "webPreferences: {");
    src.line(6, "preload: path.join(__dirname, 'preload.js'),");
    src.line(6, "contextIsolation: true,");
    src.line(6, "nodeIntegration: false,");
    src.line(4, "},");
    src.line(2, "});");
    src.blank();
    src.line(2, "mainWindow.loadFile('index.html');");
    src.line(0, "}");
    src.blank();
    src.lines(
        0,
        [
            "app.whenReady().then(() => {",
            "  createWindow();",
            "",
            "  app.on('activate', () => {",
            "    if (BrowserWindow.getAllWindows().length === 0) createWindow();",
            "  });",
            "});",
            "",
            "app.on('window-all-closed', () => {",
            "  if (process.platform !== 'darwin') app.quit();",
            "});",
        ],
    );
}

fn tauri(cx: &Composition<'_>, src: &mut Source) {
    fn hoc(kind: WrapperKind) -> &'static str {
        match kind {
            WrapperKind::Theme => "withTheme",
            WrapperKind::Auth => "withAuth",
            WrapperKind::Database => "withDatabase",
        }
    }

    src.lines(
        0,
        [
            "import { getCurrentWindow } from '@tauri-apps/api/window';",
            "import { mount } from './mount';",
            "import App from './App';",
        ],
    );
    for kind in cx.wrappers() {
        src.line(0, format!("import {{ {} }} from './{kind}';", hoc(*kind)));
    }
    src.blank();
    cx.preamble(src, 0);

    src.line(
        0,
        format!(
            "getCurrentWindow().setTitle('{}');",
            quoted(cx.project_name())
        ),
    );
    src.blank();
    src.line(0, "mount(");
    src.nest(
        2,
        ("", ""),
        cx.wrappers(),
        |kind| call_layer(format!("{}(", hoc(kind))),
        "App",
    );
    src.line(0, ");");
}

// ── Fallback ─────────────────────────────────────────────────────────────────

fn generic(cx: &Composition<'_>, src: &mut Source) {
    let framework = cx.framework().display_name;

    src.line(0, "// Sample entry point for a framework without a dedicated template");
    src.blank();
    cx.preamble(src, 0);

    src.line(0, "function initializeApp() {");
    src.line(
        2,
        format!(
            "console.log('Initializing {} with {framework}');",
            quoted(cx.project_name())
        ),
    );
    for def in cx.features() {
        let setup: String = def.display_name.split_whitespace().collect();
        src.line(2, format!("setupFeature{setup}();"));
    }
    src.line(0, "}");
    src.blank();
    src.line(0, "initializeApp();");
}
