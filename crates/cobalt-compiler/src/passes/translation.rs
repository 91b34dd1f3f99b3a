//! Validation and C emission (pass 3).
//!
//! Walks every method body once, checking it with the [`Validator`] and
//! writing C as it goes. Output sections, each in source order:
//!
//! ```text
//! /* generated by cobalt from main */   banner (optional)
//! typedef struct A A;                   forward declarations
//! struct B { A A_part; int y; };       layouts, parents first
//! int A_get(A *self);                   prototypes
//! int A_get(A *self) { ... }            definitions
//! ```
//!
//! The text is produced even when diagnostics exist; the pipeline decides
//! whether to keep it.

use cobalt_core::{ClassId, CompilationError, Diagnostics, MethodId, TypeDescriptor};
use cobalt_registry::{SymbolTable, TypeName};
use cobalt_syntax::{ClassMember, Program};

use crate::emit::{RECEIVER, SourceWriter, base_member, c_declaration, c_ident, c_type, function_name};
use crate::options::CompilerOptions;
use crate::stmt::StmtCompiler;
use crate::validator::Validator;

/// Output of the translation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutput {
    pub text: String,
    pub struct_count: usize,
    pub function_count: usize,
}

pub struct Translator<'a, 'ast> {
    table: &'a SymbolTable,
    program: &'a Program<'ast>,
    options: &'a CompilerOptions,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'ast> Translator<'a, 'ast> {
    pub fn new(
        table: &'a SymbolTable,
        program: &'a Program<'ast>,
        options: &'a CompilerOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            table,
            program,
            options,
            diagnostics,
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> TranslationOutput {
        let table = self.table;
        let validator = Validator::new(table);
        let width = self.options.indent_width;

        let mut banner = SourceWriter::new(width);
        if self.options.emit_banner {
            banner.line(format!(
                "/* generated by cobalt from {} */",
                self.options.translation_unit
            ));
        }
        let mut typedefs = SourceWriter::new(width);
        for class in table.classes() {
            let name = c_ident(&class.name);
            typedefs.line(format!("typedef struct {name} {name};"));
        }

        let order = validator.struct_order();
        let mut structs = SourceWriter::new(width);
        for class in &order {
            self.emit_struct(&mut structs, *class);
        }

        let mut prototypes = SourceWriter::new(width);
        let mut definitions = SourceWriter::new(width);
        let mut function_count = 0;
        for class in table.classes() {
            let Some(decl) = self.program.classes.get(class.decl_index) else {
                self.diagnostics.report(CompilationError::MalformedTree {
                    message: format!("no declaration for class '{}'", class.name),
                    span: class.span,
                });
                continue;
            };
            for method in &class.methods {
                let symbol = table.method(*method);
                let Some(ClassMember::Method(body)) = decl.members.get(symbol.decl_index) else {
                    self.diagnostics.report(CompilationError::MalformedTree {
                        message: format!("no declaration for method '{}.{}'", class.name, symbol.name),
                        span: symbol.span,
                    });
                    continue;
                };
                let signature = self.signature(*method);
                prototypes.line(format!("{signature};"));
                definitions.open(&signature);
                StmtCompiler::new(&validator, *method, &mut definitions, self.diagnostics)
                    .compile_body(&body.body);
                definitions.close("}");
                definitions.blank();
                function_count += 1;
            }
        }

        // Sections are separated by one blank line.
        let mut text = [banner, typedefs, structs, prototypes, definitions]
            .into_iter()
            .map(|section| section.finish().trim_end().to_string())
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if !text.is_empty() {
            text.push('\n');
        }

        let output = TranslationOutput {
            text,
            struct_count: order.len(),
            function_count,
        };
        tracing::debug!(
            structs = output.struct_count,
            functions = output.function_count,
            diagnostics = self.diagnostics.len(),
            "translation finished"
        );
        output
    }

    /// One embedded part per direct parent, in declaration order, then the
    /// class's own fields. Shadowed ancestor fields stay in their part, where
    /// the ancestor's methods find them.
    fn emit_struct(&self, out: &mut SourceWriter, class: ClassId) {
        let symbol = self.table.class(class);
        out.open(format!("struct {}", c_ident(&symbol.name)));
        if symbol.resolved_parents.is_empty() && symbol.fields.is_empty() {
            out.line("char unused_;");
        }
        for parent in &symbol.resolved_parents {
            let name = &self.table.class(*parent).name;
            out.line(format!("{} {};", c_ident(name), base_member(name)));
        }
        for field in &symbol.fields {
            let var = self.table.variable(*field);
            let ty = self.type_text(var.ty, var.type_name.as_ref());
            out.line(format!("{};", c_declaration(&ty, &c_ident(&var.name))));
        }
        out.close("};");
        out.blank();
    }

    /// `ret Class_m(Class *self, T p, ...)`
    fn signature(&self, method: MethodId) -> String {
        let symbol = self.table.method(method);
        let owner = c_ident(&self.table.class(symbol.owner).name);
        let ret = self.type_text(symbol.return_type, symbol.return_type_name.as_ref());

        let mut params = vec![format!("{owner} *{RECEIVER}")];
        for param in symbol.explicit_params() {
            let var = self.table.variable(*param);
            let ty = self.type_text(var.ty, var.type_name.as_ref());
            params.push(c_declaration(&ty, &c_ident(&var.name)));
        }
        let name = function_name(&self.table.class(symbol.owner).name, &symbol.name);
        c_declaration(&ret, &format!("{name}({})", params.join(", ")))
    }

    /// C spelling of a resolved type, or the written name when it did not
    /// resolve.
    fn type_text(&self, ty: Option<TypeDescriptor>, written: Option<&TypeName>) -> String {
        match (ty, written) {
            (Some(ty), _) => c_type(self.table, ty),
            (None, Some(name)) => c_ident(&name.name),
            (None, None) => "void".to_string(),
        }
    }
}
