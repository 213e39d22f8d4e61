//! TypeScript printer
//!
//! Renders a [`GeneratedFile`] as source text. Output is deterministic: the
//! same description always prints to the same bytes.

use std::fmt::Write as _;

use splice_domain::{
    ClassDescription, ClassMember, ConstructorDescription, Expression, GeneratedFile,
    MethodDescription, Statement, Visibility,
};

use crate::constants::PRINTER_INDENT;

/// Render a generated file
pub fn render(file: &GeneratedFile) -> String {
    let mut out = String::new();
    for import in &file.imports {
        let _ = writeln!(out, "import {{ {} }} from \"{}\";", import.name, import.from);
    }
    for class in &file.classes {
        render_class(&mut out, class);
    }
    out
}

fn render_class(out: &mut String, class: &ClassDescription) {
    let _ = writeln!(out, "export class {} extends {} {{", class.name, class.extends);
    for member in &class.members {
        match member {
            ClassMember::Method(method) => render_method(out, method),
            ClassMember::Field(field) => {
                let _ = writeln!(
                    out,
                    "{PRINTER_INDENT}{}{};",
                    visibility(field.visibility),
                    field.name
                );
            }
            ClassMember::Constructor(constructor) => render_constructor(out, constructor),
        }
    }
    out.push_str("}\n");
}

fn render_method(out: &mut String, method: &MethodDescription) {
    let asyncness = if method.is_async { "async " } else { "" };
    let _ = writeln!(
        out,
        "{PRINTER_INDENT}{}{asyncness}{}() {{",
        visibility(method.visibility),
        method.name
    );
    let _ = writeln!(
        out,
        "{PRINTER_INDENT}{PRINTER_INDENT}return {};",
        render_expression(&method.body)
    );
    let _ = writeln!(out, "{PRINTER_INDENT}}}");
}

fn render_constructor(out: &mut String, constructor: &ConstructorDescription) {
    let _ = writeln!(out, "{PRINTER_INDENT}constructor() {{");
    for statement in &constructor.body {
        let line = match statement {
            Statement::SuperCall => "super()".to_string(),
            Statement::Assign { target, value } => format!(
                "{} = {}",
                render_expression(target),
                render_expression(value)
            ),
        };
        let _ = writeln!(out, "{PRINTER_INDENT}{PRINTER_INDENT}{line};");
    }
    let _ = writeln!(out, "{PRINTER_INDENT}}}");
}

fn visibility(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "",
        Visibility::Private => "private ",
    }
}

/// Render a single expression
pub fn render_expression(expression: &Expression) -> String {
    match expression {
        Expression::This => "this".to_string(),
        Expression::Identifier { name } => name.clone(),
        Expression::Property { object, name } => format!("{}.{name}", render_expression(object)),
        Expression::Call { callee, arguments } => {
            format!("{}({})", render_expression(callee), render_list(arguments))
        }
        Expression::New { class, arguments } => format!("new {class}({})", render_list(arguments)),
        Expression::Array { elements } => format!("[{}]", render_list(elements)),
        Expression::Await { inner } => format!("await {}", render_expression(inner)),
    }
}

fn render_list(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(render_expression)
        .collect::<Vec<_>>()
        .join(", ")
}
