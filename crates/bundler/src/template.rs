use anyhow::{bail, Context, Result};
use log::warn;
use plist::{Dictionary, Value};
use recents_history::Product;
use regex::Regex;

const X_POSITION: i64 = 30;
const RULER_START: i64 = 40;
const RULER_STEP: i64 = 120;

/// Graft one Script Filter per product onto the workflow-graph template:
/// object node, connection to the main run-script node, canvas coordinate,
/// and a user-configuration field for the trigger keyword. Also stamps the
/// bundle version and readme.
pub fn inject_products(
    root: &mut Dictionary,
    products: &[&Product],
    version: &str,
    readme: &str,
) -> Result<()> {
    let products: Vec<(&str, &Product)> = products
        .iter()
        .filter_map(|product| {
            let Some(uid) = product.uid.as_deref() else {
                warn!("product '{}' has no uid; skipping its graph node", product.keyword);
                return None;
            };
            Some((uid, *product))
        })
        .collect();

    let main_uid = main_connection_uid(root)?;
    let ruler = coordinate_ruler(products.len());

    {
        let uidata = dict_mut(root, "uidata")?;
        if !ruler.is_empty() {
            let main_ypos = uidata
                .get(&main_uid)
                .and_then(Value::as_dictionary)
                .and_then(|node| node.get("ypos"))
                .and_then(Value::as_signed_integer)
                .context("main connection node has no ypos")?;
            // keep the graph centered on the new column of filters
            let offset = ruler.iter().sum::<i64>() / ruler.len() as i64 - main_ypos;
            shift_nodes(uidata, offset);
        }
        for ((uid, _), ypos) in products.iter().zip(&ruler) {
            uidata.insert((*uid).to_string(), coordinates(X_POSITION, *ypos));
        }
    }

    {
        let connections = dict_mut(root, "connections")?;
        for (uid, _) in &products {
            connections.insert((*uid).to_string(), connection(&main_uid));
        }
    }

    {
        let objects = array_mut(root, "objects")?;
        for (uid, product) in &products {
            objects.push(script_filter_object(uid, product));
        }
    }

    {
        let fields = array_mut(root, "userconfigurationconfig")?;
        for (_, product) in &products {
            fields.push(user_configuration_field(product));
        }
    }

    root.insert("version".to_string(), version.into());
    root.insert("readme".to_string(), flatten_readme_paths(readme).into());
    Ok(())
}

/// The node every Script Filter connects to, marked in the template with a
/// "Main connection" note.
pub fn main_connection_uid(root: &Dictionary) -> Result<String> {
    let uidata = root
        .get("uidata")
        .and_then(Value::as_dictionary)
        .context("template has no uidata dictionary")?;

    for (uid, node) in uidata.iter() {
        let Some(node) = node.as_dictionary() else {
            continue;
        };
        if node.get("note").and_then(Value::as_string) == Some("Main connection") {
            return Ok(uid.to_string());
        }
    }
    bail!("could not find the script object with the note 'Main connection'")
}

/// Canvas y-coordinates for a column of `size` filter nodes.
pub fn coordinate_ruler(size: usize) -> Vec<i64> {
    (0..size as i64)
        .map(|idx| RULER_START + RULER_STEP * idx)
        .collect()
}

fn shift_nodes(uidata: &mut Dictionary, offset: i64) {
    for (_, node) in uidata.iter_mut() {
        let Some(node) = node.as_dictionary_mut() else {
            continue;
        };
        let Some(ypos) = node.get("ypos").and_then(Value::as_signed_integer) else {
            continue;
        };
        node.insert("ypos".to_string(), (ypos + offset).into());
    }
}

fn coordinates(xpos: i64, ypos: i64) -> Value {
    let mut node = Dictionary::new();
    node.insert("xpos".to_string(), xpos.into());
    node.insert("ypos".to_string(), ypos.into());
    Value::Dictionary(node)
}

fn connection(destination_uid: &str) -> Value {
    let mut link = Dictionary::new();
    link.insert("destinationuid".to_string(), destination_uid.into());
    link.insert("modifiers".to_string(), 0i64.into());
    link.insert("modifiersubtext".to_string(), "".into());
    link.insert("vitoclose".to_string(), false.into());
    Value::Array(vec![Value::Dictionary(link)])
}

fn script_filter_object(uid: &str, product: &Product) -> Value {
    let mut config = Dictionary::new();
    config.insert("alfredfiltersresults".to_string(), false.into());
    config.insert("alfredfiltersresultsmatchmode".to_string(), 0i64.into());
    config.insert("argumenttreatemptyqueryasnil".to_string(), false.into());
    config.insert("argumenttrimmode".to_string(), 0i64.into());
    config.insert("argumenttype".to_string(), 1i64.into());
    config.insert("escaping".to_string(), 102i64.into());
    config.insert(
        "keyword".to_string(),
        format!("{{var:{}}}", product.keyword).into(),
    );
    config.insert("queuedelaycustom".to_string(), 3i64.into());
    config.insert("queuedelayimmediatelyinitially".to_string(), true.into());
    config.insert("queuedelaymode".to_string(), 0i64.into());
    config.insert("queuemode".to_string(), 1i64.into());
    config.insert("runningsubtext".to_string(), "".into());
    config.insert(
        "script".to_string(),
        format!("./recents ls {} \"{{query}}\"", product.keyword).into(),
    );
    config.insert("scriptargtype".to_string(), 0i64.into());
    config.insert("scriptfile".to_string(), "".into());
    config.insert("subtext".to_string(), "".into());
    config.insert("skipuniversalaction".to_string(), true.into());
    config.insert(
        "title".to_string(),
        format!("Search through your recent {} projects", product.name()).into(),
    );
    config.insert("type".to_string(), 0i64.into());
    config.insert("withspace".to_string(), true.into());

    let mut object = Dictionary::new();
    object.insert("config".to_string(), Value::Dictionary(config));
    object.insert(
        "type".to_string(),
        "alfred.workflow.input.scriptfilter".into(),
    );
    object.insert("uid".to_string(), uid.into());
    object.insert("version".to_string(), 3i64.into());
    Value::Dictionary(object)
}

fn user_configuration_field(product: &Product) -> Value {
    let mut config = Dictionary::new();
    config.insert("default".to_string(), "".into());
    config.insert("placeholder".to_string(), product.keyword.as_str().into());
    config.insert("required".to_string(), false.into());
    config.insert("trim".to_string(), true.into());

    let mut field = Dictionary::new();
    field.insert("config".to_string(), Value::Dictionary(config));
    field.insert(
        "description".to_string(),
        format!(
            "❗️Set a keyword to enable {}. Your setting will persist across workflow upgrades.",
            product.name()
        )
        .into(),
    );
    field.insert("label".to_string(), format!("{} Keyword", product.name()).into());
    field.insert("type".to_string(), "textfield".into());
    field.insert("variable".to_string(), product.keyword.as_str().into());
    Value::Dictionary(field)
}

/// The bundle carries the readme with `.readme/` image paths flattened to
/// bare file names.
pub fn flatten_readme_paths(readme: &str) -> String {
    let image_path = Regex::new(r"\.readme/(?:[^/\s]+/)*([^/\s]+)").expect("valid pattern");
    image_path.replace_all(readme, "$1").into_owned()
}

fn dict_mut<'a>(root: &'a mut Dictionary, key: &str) -> Result<&'a mut Dictionary> {
    root.get_mut(key)
        .and_then(Value::as_dictionary_mut)
        .with_context(|| format!("template has no {key} dictionary"))
}

fn array_mut<'a>(root: &'a mut Dictionary, key: &str) -> Result<&'a mut Vec<Value>> {
    root.get_mut(key)
        .and_then(Value::as_array_mut)
        .with_context(|| format!("template has no {key} array"))
}
