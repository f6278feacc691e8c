use recents_history::{HistoryError, Product, ProjectRecord};
use recents_protocol::{Item, ItemType, Mod, ScriptFilterOutput};
use regex::Regex;

const APP_KEYWORD_VAR: &str = "app_keyword";

/// Build the document for a `ls` invocation: the management view when the
/// query carries a `|path|` token from an item's autocomplete, else the
/// ranked listing.
pub fn build(
    product: &Product,
    records: Vec<ProjectRecord>,
    query: &str,
    running: bool,
) -> ScriptFilterOutput {
    if let Some(project) = management_target(&records, query) {
        let project = project.clone();
        return management_view(product, &project, running);
    }
    listing(product, records, query, running)
}

/// A token that matches no known project falls through to the listing.
fn management_target<'a>(records: &'a [ProjectRecord], query: &str) -> Option<&'a ProjectRecord> {
    let token = Regex::new(r"\|(.+?)\|").expect("valid token pattern");
    let path = token.captures(query)?.get(1)?.as_str();
    records.iter().find(|record| record.path == path)
}

fn listing(
    product: &Product,
    records: Vec<ProjectRecord>,
    query: &str,
    running: bool,
) -> ScriptFilterOutput {
    let ranked = recents_search::filter_and_sort(query, records);
    let items = ranked
        .into_iter()
        .map(|record| {
            let remove = if running {
                Mod::disabled(
                    &record.path,
                    format!(
                        "Quit {} to remove this project from the list",
                        product.name()
                    ),
                )
            } else {
                Mod::new(&record.path, "Remove this project from the list")
            };
            Item::new(&record.name, &record.path, &record.path)
                .with_mod("alt", Mod::disabled("", "Press ⇥ (tab) to manage this project"))
                .with_mod("cmd", remove)
        })
        .collect();

    ScriptFilterOutput::new(items).variable(APP_KEYWORD_VAR, product.keyword.as_str())
}

fn management_view(
    product: &Product,
    project: &ProjectRecord,
    running: bool,
) -> ScriptFilterOutput {
    let open_item = Item::new(
        format!("Open {} in {}", project.name, product.name()),
        "Open this project in the IDE",
        &project.path,
    )
    .autocomplete("");

    let mut items = Vec::new();
    if running {
        items.push(
            Item::new(
                format!("⚠️ Quit {} to see all options", product.name()),
                "Action this item to go back to the main list",
                "",
            )
            .item_type(ItemType::Default)
            .invalid()
            .autocomplete(""),
        );
        items.push(open_item);
    } else {
        items.push(
            Item::new(
                format!("Remove {} from the list", project.name),
                "The project will remain on your drive",
                &project.path,
            )
            .variable("remove_from_list", true)
            .autocomplete(""),
        );
        items.push(
            Item::new(
                format!("🛑 Delete {} from disk", project.name),
                "The project will be moved to the trash and removed from the list",
                &project.path,
            )
            .variable("delete_from_disk", true)
            .autocomplete(""),
        );
        items.push(open_item);
        items.push(
            Item::new("⬅︎ Go back", "Action this item to go back to the main list", "")
                .item_type(ItemType::Default)
                .invalid()
                .autocomplete(""),
        );
    }

    for item in &mut items {
        item.add_mod(
            "alt",
            Mod::disabled("", "Press ⇥ (tab) to return to the main list"),
        );
    }

    ScriptFilterOutput::new(items).variable(APP_KEYWORD_VAR, product.keyword.as_str())
}

/// Single disabled item shown in place of an empty or failed listing.
pub fn placeholder(product: &Product, err: &HistoryError) -> ScriptFilterOutput {
    let subtitle = match err {
        HistoryError::NoPreferencesFolder { .. } => {
            format!("No preferences were found for {}", product.name())
        }
        _ => format!("The recent projects file was not found for {}", product.name()),
    };

    let item = Item::new(
        format!("No recent projects for {}", product.name()),
        subtitle,
        "",
    )
    .item_type(ItemType::Default)
    .invalid()
    .autocomplete("");

    ScriptFilterOutput::new(vec![item]).variable(APP_KEYWORD_VAR, product.keyword.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product() -> Product {
        Product {
            keyword: "goland".to_string(),
            uid: None,
            folder_name: "GoLand".to_string(),
            bundle_id: "com.jetbrains.goland".to_string(),
            display_name: None,
            preferences_path: "~/Library/Application Support/JetBrains/".to_string(),
        }
    }

    fn records() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord::from_path("~/proj"),
            ProjectRecord::from_path("~/Documents/spring-petclinic"),
        ]
    }

    #[test]
    fn listing_emits_one_item_per_record() {
        let output = build(&product(), records(), "", false);

        assert_eq!(output.variables["app_keyword"], "goland");
        assert_eq!(output.items.len(), 2);

        let first = &output.items[0];
        assert_eq!(first.title, "proj");
        assert_eq!(first.subtitle, "~/proj");
        assert_eq!(first.arg, "~/proj");
        assert_eq!(first.autocomplete, "|~/proj|");
        assert!(!first.mods["alt"].valid);
    }

    #[test]
    fn remove_mod_is_enabled_only_while_not_running() {
        let stopped = build(&product(), records(), "", false);
        for item in &stopped.items {
            let remove = &item.mods["cmd"];
            assert!(remove.valid);
            assert_eq!(remove.arg, item.arg);
        }

        let running = build(&product(), records(), "", true);
        for item in &running.items {
            let remove = &item.mods["cmd"];
            assert!(!remove.valid);
            assert!(remove.subtitle.contains("Quit GoLand"));
        }
    }

    #[test]
    fn query_filters_the_listing() {
        let output = build(&product(), records(), "petclinic", false);
        assert_eq!(output.items.len(), 1);
        assert_eq!(output.items[0].title, "spring-petclinic");
    }

    #[test]
    fn management_token_opens_the_management_view() {
        let output = build(&product(), records(), "|~/proj|", false);

        let titles: Vec<&str> = output.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Remove proj from the list",
                "🛑 Delete proj from disk",
                "Open proj in GoLand",
                "⬅︎ Go back",
            ]
        );

        assert_eq!(output.items[0].variables["remove_from_list"], true);
        assert_eq!(output.items[1].variables["delete_from_disk"], true);
        assert!(!output.items[3].valid);
        for item in &output.items {
            assert!(!item.mods["alt"].valid);
            assert_eq!(item.autocomplete, "");
        }
    }

    #[test]
    fn management_view_shrinks_while_running() {
        let output = build(&product(), records(), "|~/proj|", true);

        let titles: Vec<&str> = output.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["⚠️ Quit GoLand to see all options", "Open proj in GoLand"]
        );
        assert!(!output.items[0].valid);
    }

    #[test]
    fn unknown_management_token_falls_through_to_listing() {
        let output = build(&product(), records(), "|~/not-in-history|", false);
        // the token matches no record and nothing else either
        assert!(output.items.is_empty());
    }

    #[test]
    fn placeholder_messages_distinguish_failure_kinds() {
        let product = product();

        let no_prefs = placeholder(
            &product,
            &HistoryError::NoPreferencesFolder {
                token: "GoLand".to_string(),
                root: "/tmp".into(),
            },
        );
        assert_eq!(no_prefs.items.len(), 1);
        assert!(!no_prefs.items[0].valid);
        assert!(no_prefs.items[0].subtitle.contains("No preferences"));

        let no_file = placeholder(
            &product,
            &HistoryError::HistoryFileMissing {
                path: "/tmp/recentProjects.xml".into(),
            },
        );
        assert!(no_file.items[0].subtitle.contains("file was not found"));
        assert_eq!(no_file.variables["app_keyword"], "goland");
    }
}
