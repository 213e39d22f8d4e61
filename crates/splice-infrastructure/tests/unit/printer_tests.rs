//! Printer Tests
//!
//! Expected texts follow the layout of hand-written reference outputs.

use splice_application::generate_implementations;
use splice_domain::{Expression, GeneratedFile, Graph, ImportDeclaration};
use splice_infrastructure::emission::{render, render_expression};

const SOURCE: &str = "src/index.ts";

fn render_single(graph: &Graph) -> String {
    let files = generate_implementations(graph, false).unwrap();
    assert_eq!(files.len(), 1);
    render(&files[0])
}

#[test]
fn test_render_circular_modules() {
    let mut builder = Graph::builder();
    let t1 = builder.types_mut().class("T1");
    let t2 = builder.types_mut().class("T2");
    let t3 = builder.types_mut().class("T3");
    let t4 = builder.types_mut().class("T4");
    let m1 = builder.add_module("Module1", SOURCE).unwrap();
    let m2 = builder.add_module("Module2", SOURCE).unwrap();
    builder.include(m1, m2);
    builder.include(m2, m1);
    builder.add_provider(m1, "p1", vec![], t1, false);
    builder.add_provider(m1, "p2", vec![t3], t2, false);
    builder.add_provider(m2, "p3", vec![], t3, false);
    builder.add_provider(m2, "p4", vec![t1], t4, false);
    let component = builder.add_component("Component", SOURCE, m1).unwrap();
    for (name, ty) in [("t1", t1), ("t2", t2), ("t3", t3), ("t4", t4)] {
        builder.add_resolver(component, name, ty);
    }

    let expected = r#"import { Component } from "../index.js";
import { Module1 } from "../index.js";
import { Module2 } from "../index.js";
export class ComponentImpl extends Component {
    t1() {
        return this._Module1_p1();
    }
    t2() {
        return this._Module1_p2();
    }
    t3() {
        return this._Module2_p3();
    }
    t4() {
        return this._Module2_p4();
    }
    private _Module1;
    private _Module2;
    constructor() {
        super();
        this._Module1 = new Module1();
        this._Module2 = new Module2();
    }
    private _Module1_p1() {
        return this._Module1.p1();
    }
    private _Module1_p2() {
        return this._Module1.p2(this._Module2_p3());
    }
    private _Module2_p3() {
        return this._Module2.p3();
    }
    private _Module2_p4() {
        return this._Module2.p4(this._Module1_p1());
    }
}
"#;
    assert_eq!(render_single(&builder.build()), expected);
}

#[test]
fn test_render_readme_example() {
    let mut builder = Graph::builder();
    let logger = builder.types_mut().class("Logger");
    let app = builder.types_mut().class("App");
    let module = builder.add_module("AppModule", SOURCE).unwrap();
    builder.add_provider(module, "provideLogger", vec![], logger, false);
    builder.add_provider(module, "provideApp", vec![logger], app, false);
    let component = builder.add_component("AppComponent", SOURCE, module).unwrap();
    builder.add_resolver(component, "provideApp", app);

    let expected = r#"import { AppComponent } from "../index.js";
import { AppModule } from "../index.js";
export class AppComponentImpl extends AppComponent {
    provideApp() {
        return this._AppModule_provideApp();
    }
    private _AppModule;
    constructor() {
        super();
        this._AppModule = new AppModule();
    }
    private _AppModule_provideApp() {
        return this._AppModule.provideApp(this._AppModule_provideLogger());
    }
    private _AppModule_provideLogger() {
        return this._AppModule.provideLogger();
    }
}
"#;
    assert_eq!(render_single(&builder.build()), expected);
}

#[test]
fn test_render_async_providers() {
    let mut builder = Graph::builder();
    let types = builder.types_mut();
    let t1 = types.class("T1");
    let t2 = types.class("T2");
    let t3 = types.class("T3");
    let set = types.set_of(t2);
    let promise_t1 = types.promise_of(t1);
    let promise_t2 = types.promise_of(t2);
    let promise_t3 = types.promise_of(t3);
    let module = builder.add_module("Module", SOURCE).unwrap();
    builder.add_provider(module, "p1", vec![], t1, true);
    builder.add_provider(module, "p2", vec![t1], t2, false);
    builder.add_provider(module, "p3", vec![set], t3, false);
    let component = builder.add_component("Component", SOURCE, module).unwrap();
    builder.add_resolver(component, "t1", promise_t1);
    builder.add_resolver(component, "t2", promise_t2);
    builder.add_resolver(component, "t3", promise_t3);

    let expected = r#"import { Component } from "../index.js";
import { Module } from "../index.js";
export class ComponentImpl extends Component {
    async t1() {
        return this._Module_p1();
    }
    async t2() {
        return this._Module_p2();
    }
    async t3() {
        return this._Module_p3();
    }
    private _Module;
    constructor() {
        super();
        this._Module = new Module();
    }
    private async _Module_p1() {
        return this._Module.p1();
    }
    private async _Module_p2() {
        return this._Module.p2(await this._Module_p1());
    }
    private async _Module_p3() {
        return this._Module.p3(await this._Module_synthetic_0());
    }
    private async _Module_synthetic_0() {
        return new Set([await this._Module_p2()]);
    }
}
"#;
    assert_eq!(render_single(&builder.build()), expected);
}

#[test]
fn test_render_expression_forms() {
    let expression = Expression::New {
        class: "Set".to_string(),
        arguments: vec![Expression::Array {
            elements: vec![
                Expression::identifier("a"),
                Expression::this_property("_M_p")
                    .call(vec![Expression::identifier("x"), Expression::identifier("y")])
                    .awaited_if(true),
            ],
        }],
    };

    assert_eq!(
        render_expression(&expression),
        "new Set([a, await this._M_p(x, y)])"
    );
    assert_eq!(
        render_expression(&Expression::New {
            class: "Set".to_string(),
            arguments: vec![Expression::Array { elements: vec![] }],
        }),
        "new Set([])"
    );
}

#[test]
fn test_render_imports_only_file() {
    let file = GeneratedFile {
        path: "gen/index.ts".into(),
        imports: vec![ImportDeclaration::new("Component", "./index.js")],
        classes: vec![],
    };

    assert_eq!(render(&file), "import { Component } from \"./index.js\";\n");
}
