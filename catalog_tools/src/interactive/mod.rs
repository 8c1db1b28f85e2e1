use std::{borrow::Cow, fmt::Display, path::Path, time::Duration};

use anyhow::Result;
use dialoguer::{console::Style, theme::ColorfulTheme, FuzzySelect, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::*;
use loja_tools::DEFAULT_SNAPSHOT_FILE;

use crate::{
    combine::{combine, CombineSource},
    credentials::{baserow_config, loja_config, save_baserow_profile, save_loja_profile},
    interactive::menus::{commands::*, top_menu, Menu},
    probe::{probe_products, validate_snapshot},
    provision::{provision, test_connection, ProvisionOptions},
};

pub mod formatting;
pub mod menus;
pub mod selector;

pub struct InteractiveApp {
    current_menu: &'static Menu,
    breadcrumbs: Vec<&'static Menu>,
}

impl Default for InteractiveApp {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveApp {
    pub fn new() -> Self {
        let current_menu = top_menu();
        let breadcrumbs = vec![top_menu()];
        Self { current_menu, breadcrumbs }
    }

    pub fn menu_prompt(&self) -> String {
        self.breadcrumbs.iter().map(|m| m.0).collect::<Vec<&str>>().join(" » ")
    }

    pub fn pop_menu(&mut self) {
        if self.breadcrumbs.len() > 1 {
            self.breadcrumbs.pop();
        }
        if let Some(menu) = self.breadcrumbs.last().copied() {
            self.current_menu = menu;
        }
    }

    pub fn select_menu(&mut self, menu: &'static Menu) {
        self.breadcrumbs.push(menu);
        self.current_menu = menu;
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let theme = ColorfulTheme { prompt_style: Style::new().magenta().bold(), ..ColorfulTheme::default() };
            let i = FuzzySelect::with_theme(&theme)
                .with_prompt(self.menu_prompt())
                .items(self.current_menu.1)
                .interact()?;
            match self.current_menu.1[i] {
                PROBE => self.probe().await,
                VALIDATE => self.validate(),
                COMBINE_FILES => self.combine_files().await,
                COMBINE_LIVE => self.combine_live().await,
                SELF_TEST => handle_response(combine(CombineSource::SelfTest, None).await),
                SAVE_LOJA_PROFILE => {
                    if let Err(e) = loja_config(None, None).and_then(|c| save_loja_profile(&c)) {
                        println!("Error: {e}")
                    }
                },
                TEST_CONNECTION => self.test_connection().await,
                PROVISION => self.provision().await,
                SAVE_BASEROW_PROFILE => {
                    if let Err(e) = baserow_config(None, None).and_then(|c| save_baserow_profile(&c)) {
                        println!("Error: {e}")
                    }
                },
                NAV_TO_LOJA_MENU => self.select_menu(menus::loja_menu()),
                NAV_TO_BASEROW_MENU => self.select_menu(menus::baserow_menu()),
                NAV_BACK => self.pop_menu(),
                EXIT => break,
                _ => continue,
            }
        }
        Ok(())
    }

    async fn probe(&self) {
        let res: Result<String> = async {
            let config = loja_config(None, None)?;
            let limit = Input::<u32>::new().with_prompt("Limit").default(5).interact_text()?;
            let offset = Input::<u32>::new().with_prompt("Offset").default(0).interact_text()?;
            probe_products(config, limit, offset, Path::new(DEFAULT_SNAPSHOT_FILE)).await
        }
        .await;
        handle_response(res)
    }

    fn validate(&self) {
        let res =
            prompt_path("Snapshot file", DEFAULT_SNAPSHOT_FILE).and_then(|path| validate_snapshot(Path::new(&path)));
        handle_response(res)
    }

    async fn combine_files(&self) {
        let res: Result<String> = async {
            let products = prompt_path("Products file", DEFAULT_SNAPSHOT_FILE)?;
            let prices = prompt_path("Prices file", "precos.json")?;
            let source = CombineSource::Files { products: products.into(), prices: prices.into() };
            combine(source, None).await
        }
        .await;
        handle_response(res)
    }

    async fn combine_live(&self) {
        let res: Result<String> = async {
            let config = loja_config(None, None)?;
            let limit = Input::<u32>::new().with_prompt("Limit").default(20).interact_text()?;
            combine(CombineSource::Live { config, limit }, None).await
        }
        .await;
        handle_response(res)
    }

    async fn test_connection(&self) {
        let res: Result<String> = async { test_connection(baserow_config(None, None)?).await }.await;
        handle_response(res)
    }

    async fn provision(&self) {
        let res: Result<String> =
            async { provision(baserow_config(None, None)?, ProvisionOptions::default()).await }.await;
        handle_response(res)
    }
}

fn prompt_path(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).default(default.to_string()).interact_text()?)
}

pub fn handle_response<T: Display>(res: Result<T>) {
    match res {
        Ok(res) => println!("{res}"),
        Err(e) => println!("Error: {e}"),
    }
}

/// A clock-face spinner for requests that may take a while.
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    match ProgressStyle::with_template("{spinner:5} {msg} [{elapsed}]") {
        Ok(style) => pb.set_style(
            style.tick_strings(&["🕛 ", "🕐 ", "🕑 ", "🕒 ", "🕓 ", "🕔 ", "🕕 ", "🕖 ", "🕗 ", "🕘 ", "🕙 ", "🕚 "]),
        ),
        Err(e) => warn!("Could not style the progress spinner. {e}"),
    }
    pb.set_message(message);
    pb
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn breadcrumbs() {
        let mut app = InteractiveApp::new();
        assert_eq!(app.menu_prompt(), "Main");
        app.select_menu(menus::baserow_menu());
        assert_eq!(app.menu_prompt(), "Main » Baserow");
        assert_eq!(app.current_menu.0, "Baserow");
        app.pop_menu();
        app.pop_menu();
        assert_eq!(app.menu_prompt(), "Main");
        assert_eq!(app.current_menu.0, "Main");
    }
}
