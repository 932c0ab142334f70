use bus::NavigationSource;
use busy::{BusyForm, BusyLink, DomForm, FormProps, LinkProps};
use dom::build::{elem, text};
use dom::{Node, attr, has_attr};
use router::Router;
use std::process::ExitCode;

const DEFAULT_BASE_URL: &str = "http://localhost/";

fn base_url() -> String {
    std::env::var("BUSYFORM_BASE_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn sample_form() -> Node {
    elem(
        "form",
        &[("id", Some("profile"))],
        vec![
            elem("input", &[("id", Some("name")), ("type", Some("text"))], vec![]),
            elem(
                "input",
                &[("id", Some("account")), ("readonly", None)],
                vec![],
            ),
            elem(
                "select",
                &[("id", Some("plan"))],
                vec![
                    elem("option", &[("value", Some("free"))], vec![text("Free")]),
                    elem(
                        "option",
                        &[("value", Some("pro")), ("selected", None)],
                        vec![text("Pro")],
                    ),
                    elem(
                        "option",
                        &[("value", Some("legacy")), ("disabled", None)],
                        vec![text("Legacy")],
                    ),
                ],
            ),
            elem("button", &[("id", Some("save"))], vec![text("Save")]),
        ],
    )
}

fn describe(node: &Node, out: &mut Vec<String>) {
    if let Some(name) = node.name() {
        let label = attr(node, "id")
            .or_else(|| attr(node, "value"))
            .unwrap_or(name);
        let mut flags = Vec::new();
        if has_attr(node, "readonly") {
            flags.push("readonly");
        }
        if has_attr(node, "disabled") {
            flags.push("disabled");
        }
        if attr(node, "aria-busy") == Some("true") {
            flags.push("busy");
        }
        if !flags.is_empty() {
            out.push(format!("{name}#{label}[{}]", flags.join(",")));
        }
    }
    for child in node.children() {
        describe(child, out);
    }
}

fn report(stage: &str, form: &BusyForm<DomForm>) {
    let mut flags = Vec::new();
    if let Some(container) = form.container() {
        describe(container.node(), &mut flags);
    }
    println!("{stage:<12} {:?}  {}", form.phase(), flags.join(" "));
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let base = base_url();
    let mut router = Router::default();

    println!("== form ({})", base);
    let container = DomForm::new(sample_form()).ok_or("sample markup is not a form")?;
    let mut form = BusyForm::mount(1, container, FormProps::new("/profile"), &mut router);
    report("mounted", &form);

    form.submit(&mut router)?;
    report("submitted", &form);

    router.advance()?;
    form.pump();
    report("loading", &form);

    router.complete()?;
    form.pump();
    report("idle", &form);
    form.unmount();

    println!("== links");
    let mut home = BusyLink::new(LinkProps::to("/"), &base)?;
    let mut docs = BusyLink::new(LinkProps::to("docs/intro"), &base)?;
    docs.click(&mut router)?;
    let nav = router.navigation();
    println!(
        "clicked docs ({}): home busy={} docs busy={}",
        docs.intent().unwrap_or("-"),
        home.is_busy(&nav),
        docs.is_busy(&nav)
    );
    router.complete()?;
    let nav = router.navigation();
    println!(
        "after idle:          home busy={} docs busy={}",
        home.is_busy(&nav),
        docs.is_busy(&nav)
    );
    home.click(&mut router)?;
    println!(
        "clicked home:        home busy={} docs busy={}",
        home.is_busy(&router.navigation()),
        docs.is_busy(&router.navigation())
    );

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("busyform: {err}");
            ExitCode::FAILURE
        }
    }
}
