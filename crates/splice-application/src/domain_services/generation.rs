//! Implementation Generator
//!
//! Turns an aggregated [`Resolution`] into the declarative description of a
//! class extending its component. Naming is a pure function of the graph and
//! the resolution, so regenerating an unchanged graph yields identical output.
//!
//! ## Generated layout
//!
//! | Member | Name | Body |
//! |--------|------|------|
//! | resolver override | resolver name | `return this.<accessor>();` |
//! | module instance | `_<Module>` | assigned in the constructor |
//! | provider accessor | `_<Module>_<provider>` | `return this._<Module>.<provider>(args);` |
//! | set accessor | `_<Module>_synthetic_<n>` | `return new Set([elements]);` |

use std::collections::HashMap;
use std::path::{Component as PathComponent, Path, PathBuf};

use splice_domain::constants::{
    GENERATED_DIR_SEGMENT, IMPLEMENTATION_SUFFIX, IMPORT_EXTENSION, MEMBER_PREFIX,
    SET_CONTAINER_NAME, SYNTHETIC_ACCESSOR_PREFIX,
};
use splice_domain::{
    ClassDescription, ClassMember, ConstructorDescription, Error, Expression, FieldDescription,
    GeneratedFile, Graph, ImportDeclaration, MethodDescription, ModuleId, Resolution, Result,
    SetId, Statement, TypeResolution, Visibility,
};

/// Builds class descriptions and output files for resolved components
pub struct ImplementationGenerator<'g> {
    graph: &'g Graph,
}

impl<'g> ImplementationGenerator<'g> {
    /// Create a generator over `graph`
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Group resolutions by component source file and build one output file per source
    ///
    /// Files appear in the order their first component was declared; classes
    /// within a file keep resolution order.
    pub fn generate(&self, resolutions: &[Resolution]) -> Result<Vec<GeneratedFile>> {
        let mut files: Vec<GeneratedFile> = Vec::new();
        for resolution in resolutions {
            let source = &self.graph.component(resolution.component).source;
            let path = output_path(source)?;
            let output_dir = path.parent().unwrap_or_else(|| Path::new(""));
            let imports = self.imports(resolution, output_dir)?;
            let class = self.generate_class(resolution);

            if let Some(file) = files.iter_mut().find(|file| file.path == path) {
                for import in imports {
                    if !file.imports.contains(&import) {
                        file.imports.push(import);
                    }
                }
                file.classes.push(class);
            } else {
                files.push(GeneratedFile {
                    path,
                    imports,
                    classes: vec![class],
                });
            }
        }
        Ok(files)
    }

    /// Import declarations for the component and each module instance
    pub fn imports(
        &self,
        resolution: &Resolution,
        output_dir: &Path,
    ) -> Result<Vec<ImportDeclaration>> {
        let component = self.graph.component(resolution.component);
        let mut imports = Vec::with_capacity(resolution.modules.len() + 1);
        imports.push(ImportDeclaration::new(
            &component.name,
            import_specifier(output_dir, &component.source)?,
        ));
        for &module in &resolution.modules {
            let module = self.graph.module(module);
            imports.push(ImportDeclaration::new(
                &module.name,
                import_specifier(output_dir, &module.source)?,
            ));
        }
        Ok(imports)
    }

    /// Class description of `<Component>Impl`
    pub fn generate_class(&self, resolution: &Resolution) -> ClassDescription {
        let component = self.graph.component(resolution.component);
        let mut names = AccessorNames::new(self.graph);
        let mut members = Vec::new();

        for resolver in &resolution.resolvers {
            members.push(ClassMember::Method(MethodDescription {
                name: resolver.name.clone(),
                visibility: Visibility::Public,
                is_async: resolver.resolution.requires_async(),
                body: Expression::this_property(names.accessor(&resolver.resolution))
                    .call(vec![]),
            }));
        }

        for &module in &resolution.modules {
            members.push(ClassMember::Field(FieldDescription {
                name: names.module_field(module),
                visibility: Visibility::Private,
            }));
        }

        let mut constructor = vec![Statement::SuperCall];
        for &module in &resolution.modules {
            constructor.push(Statement::Assign {
                target: Expression::this_property(names.module_field(module)),
                value: Expression::New {
                    class: self.graph.module(module).name.clone(),
                    arguments: vec![],
                },
            });
        }
        members.push(ClassMember::Constructor(ConstructorDescription {
            body: constructor,
        }));

        for plan in &resolution.plans {
            members.push(ClassMember::Method(self.accessor(plan, &mut names)));
        }

        ClassDescription {
            name: format!("{}{IMPLEMENTATION_SUFFIX}", component.name),
            extends: component.name.clone(),
            members,
        }
    }

    fn accessor(&self, plan: &TypeResolution, names: &mut AccessorNames<'_>) -> MethodDescription {
        let name = names.accessor(plan);
        let body = match plan {
            TypeResolution::Provider(provider) => {
                let arguments = provider
                    .arguments
                    .iter()
                    .map(|argument| names.call(argument))
                    .collect();
                Expression::this_property(names.module_field(provider.module))
                    .property(&self.graph.provider(provider.provider).name)
                    .call(arguments)
            }
            TypeResolution::Set(set) => Expression::New {
                class: SET_CONTAINER_NAME.to_string(),
                arguments: vec![Expression::Array {
                    elements: set.elements.iter().map(|element| names.call(element)).collect(),
                }],
            },
        };
        MethodDescription {
            name,
            visibility: Visibility::Private,
            is_async: plan.requires_async(),
            body,
        }
    }
}

/// Accessor naming state for one generated class
///
/// Set accessors are numbered in the order their names are first requested.
struct AccessorNames<'g> {
    graph: &'g Graph,
    synthetic: HashMap<SetId, usize>,
}

impl<'g> AccessorNames<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            synthetic: HashMap::new(),
        }
    }

    fn module_field(&self, module: ModuleId) -> String {
        format!("{MEMBER_PREFIX}{}", self.graph.module(module).name)
    }

    fn accessor(&mut self, plan: &TypeResolution) -> String {
        match plan {
            TypeResolution::Provider(provider) => format!(
                "{}_{}",
                self.module_field(provider.module),
                self.graph.provider(provider.provider).name
            ),
            TypeResolution::Set(set) => {
                let next = self.synthetic.len();
                let index = *self.synthetic.entry(set.id).or_insert(next);
                format!(
                    "{}_{SYNTHETIC_ACCESSOR_PREFIX}{index}",
                    self.module_field(set.module)
                )
            }
        }
    }

    /// `this.<accessor>()`, awaited when the plan is asynchronous
    fn call(&mut self, plan: &TypeResolution) -> Expression {
        Expression::this_property(self.accessor(plan))
            .call(vec![])
            .awaited_if(plan.requires_async())
    }
}

/// Location of the generated file for a component declared in `source`
///
/// `<dir>/<name>` maps to `<dir>/gen/<name>`.
pub fn output_path(source: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        Error::internal(format!("source path {} has no file name", source.display()))
    })?;
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(GENERATED_DIR_SEGMENT).join(file_name))
}

/// Module specifier importing `source` from a file in `output_dir`
///
/// The relative directory is followed by the source stem and `.js`; a
/// leading `./` is added when both directories coincide.
pub fn import_specifier(output_dir: &Path, source: &Path) -> Result<String> {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            Error::internal(format!("source path {} has no file stem", source.display()))
        })?;
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let relative = relative_path(output_dir, source_dir);
    let file = format!("{stem}.{IMPORT_EXTENSION}");
    Ok(if relative.is_empty() {
        format!("./{file}")
    } else {
        format!("{relative}/{file}")
    })
}

/// Lexical relative path from `from` to `to`, `/`-separated
fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalized(from);
    let to = normalized(to);
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(left, right)| left == right)
        .count();
    let mut segments: Vec<&str> = vec![".."; from.len() - common];
    segments.extend(to[common..].iter().map(String::as_str));
    segments.join("/")
}

fn normalized(path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            PathComponent::CurDir => {}
            PathComponent::ParentDir => {
                if segments.last().is_some_and(|last| last != "..") {
                    segments.pop();
                } else {
                    segments.push("..".to_string());
                }
            }
            other => segments.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    segments
}
