use bumpalo::Bump;
use cobalt::syntax::{BinaryOp, Program, TreeBuilder};
use cobalt::{CompilerOptions, DiagnosticKind, Diagnostics, Stage, compile, compile_with};

/// class A { def m(self): int { return 1; } }
/// class B inherits A { def n(self): int { return self.m(); } }
fn inherited_call<'a>(b: &TreeBuilder<'a>) -> Vec<cobalt::syntax::ClassDecl<'a>> {
    vec![
        b.class(
            "A",
            &[],
            &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(1)))])],
        ),
        b.class(
            "B",
            &["A"],
            &[b.method(
                "n",
                &[b.receiver("self")],
                Some("int"),
                &[b.ret(Some(b.call(Some(b.self_()), "m", &[])))],
            )],
        ),
    ]
}

fn errors(program: &Program<'_>) -> Diagnostics {
    match compile(program) {
        Ok(output) => panic!("expected diagnostics, got:\n{}", output.text),
        Err(diagnostics) => diagnostics,
    }
}

#[test]
fn test_inherited_call_resolves_to_owner() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&inherited_call(&b));

    let output = compile(&program).unwrap();
    assert_eq!(output.class_count, 2);
    assert_eq!(output.function_count, 2);
    assert_eq!(
        output.text,
        "/* generated by cobalt from main */\n\
         \n\
         typedef struct A A;\n\
         typedef struct B B;\n\
         \n\
         struct A {\n    \
             char unused_;\n\
         };\n\
         \n\
         struct B {\n    \
             A A_part;\n\
         };\n\
         \n\
         int A_m(A *self);\n\
         int B_n(B *self);\n\
         \n\
         int A_m(A *self) {\n    \
             return 1;\n\
         }\n\
         \n\
         int B_n(B *self) {\n    \
             return A_m(&self->A_part);\n\
         }\n"
    );
    assert!(!output.text.contains("B_m"));
}

#[test]
fn test_construction_then_call() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let mut classes = inherited_call(&b);
    classes.push(b.class(
        "Main",
        &[],
        &[b.method(
            "run",
            &[b.receiver("self")],
            Some("int"),
            &[b.ret(Some(b.call(Some(b.construct("B")), "n", &[])))],
        )],
    ));
    let program = b.program(&classes);

    let output = compile(&program).unwrap();
    assert!(output.text.contains("int Main_run(Main *self) {\n    return B_n(&(B){0});\n}\n"));
}

#[test]
fn test_compilation_is_idempotent() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let mut classes = inherited_call(&b);
    classes.push(b.class(
        "C",
        &["B"],
        &[
            b.field("int", &["total"]),
            b.field("B", &["inner"]),
            b.method(
                "step",
                &[b.receiver("self"), b.param("k", "int")],
                None,
                &[
                    b.local_init("int", "i", b.int(0)),
                    b.while_(
                        b.binary(b.var("i"), BinaryOp::Less, b.var("k")),
                        &[
                            b.assign("total", b.binary(b.var("total"), BinaryOp::Add, b.call(None, "n", &[]))),
                            b.assign("i", b.binary(b.var("i"), BinaryOp::Add, b.int(1))),
                        ],
                    ),
                ],
            ),
        ],
    ));
    let program = b.program(&classes);

    let first = compile(&program).unwrap();
    let second = compile(&program).unwrap();
    assert_eq!(first, second);
    assert!(first.text.contains("self->total = self->total + B_n(&self->B_part);"));
}

#[test]
fn test_duplicate_class_reported_once() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[
        b.class("A", &[], &[b.field("int", &["x"])]),
        b.class("A", &[], &[b.method("m", &[b.receiver("self")], None, &[])]),
    ]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DuplicateDeclaration]);
}

#[test]
fn test_unknown_parent_keeps_own_methods() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "A",
        &["Ghost"],
        &[
            b.field("int", &["x"]),
            b.method(
                "m",
                &[b.receiver("self")],
                Some("int"),
                &[b.ret(Some(b.binary(b.var("x"), BinaryOp::Add, b.call(None, "m", &[]))))],
            ),
        ],
    )]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnknownParentClass]);
    assert!(diagnostics.to_string().contains("unknown class 'Ghost'"));
}

#[test]
fn test_lookup_against_broken_class() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[
        b.class("A", &["Ghost"], &[]),
        b.class(
            "User",
            &[],
            &[b.method(
                "run",
                &[b.receiver("self"), b.param("a", "A")],
                None,
                &[b.expr_stmt(b.call(Some(b.var("a")), "inherited", &[]))],
            )],
        ),
    ]);

    let diagnostics = errors(&program);
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::UnknownParentClass, DiagnosticKind::UnresolvedClass]
    );
}

#[test]
fn test_self_inheritance_is_cyclic() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class("A", &["A"], &[])]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::CyclicInheritance]);
}

#[test]
fn test_every_class_on_a_cycle_is_reported() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class("A", &["B"], &[]), b.class("B", &["A"], &[])]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.count_of(DiagnosticKind::CyclicInheritance), 2);
    let text = diagnostics.to_string();
    assert!(text.contains("'A'"));
    assert!(text.contains("'B'"));
}

/// class B { def m(self): int }
/// class C { def m(self, int x): int }
/// class D inherits B, C { ... }
fn diamond<'a>(b: &TreeBuilder<'a>, d_members: &[cobalt::syntax::ClassMember<'a>]) -> Program<'a> {
    b.program(&[
        b.class("Root", &[], &[]),
        b.class(
            "B",
            &["Root"],
            &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(1)))])],
        ),
        b.class(
            "C",
            &["Root"],
            &[b.method(
                "m",
                &[b.receiver("self"), b.param("x", "int")],
                Some("int"),
                &[b.ret(Some(b.var("x")))],
            )],
        ),
        b.class("D", &["B", "C"], d_members),
    ])
}

#[test]
fn test_diamond_without_override_is_ambiguous() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = diamond(&b, &[]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::AmbiguousMethodResolution]);
    assert!(diagnostics.to_string().contains("B.m, C.m"));
}

#[test]
fn test_diamond_override_is_emitted() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = diamond(
        &b,
        &[
            b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(2)))]),
            b.method(
                "use_m",
                &[b.receiver("self")],
                Some("int"),
                &[b.ret(Some(b.call(None, "m", &[])))],
            ),
        ],
    );

    let output = compile(&program).unwrap();
    assert!(output.text.contains("int D_m(D *self) {\n    return 2;\n}\n"));
    assert!(output.text.contains("return D_m(self);"));
}

#[test]
fn test_undeclared_operand_halts_generation() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let undeclared = b.at(3, 17).var("b");
    let program = b.program(&[b.class(
        "A",
        &[],
        &[b.method(
            "m",
            &[b.receiver("self")],
            None,
            &[
                b.local("int", &["a"]),
                b.assign("a", b.binary(undeclared, BinaryOp::Add, b.int(1))),
            ],
        )],
    )]);

    let result = cobalt::Compilation::new(CompilerOptions::default()).run(&program);
    assert_eq!(result.stage, Stage::Validated);
    assert!(result.output.is_none());
    assert_eq!(result.diagnostics.kinds(), vec![DiagnosticKind::UndeclaredIdentifier]);
    assert!(
        result
            .diagnostics
            .to_string()
            .contains("at 3:17: undeclared identifier 'b'")
    );
}

#[test]
fn test_bare_return_from_int_method() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "A",
        &[],
        &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(None)])],
    )]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::TypeMismatch]);
}

#[test]
fn test_clean_declarations_only_yield_body_errors() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "A",
        &[],
        &[
            b.field("int", &["x"]),
            b.method(
                "m",
                &[b.receiver("self"), b.param("p", "int")],
                Some("int"),
                &[b.ret(Some(b.var("p")))],
            ),
            b.method(
                "n",
                &[b.receiver("self")],
                None,
                &[
                    b.assign("x", b.call(Some(b.self_()), "m", &[])),
                    b.assign("x", b.self_()),
                    b.while_(b.self_(), &[]),
                    b.expr_stmt(b.call(None, "missing", &[])),
                ],
            ),
        ],
    )]);

    let diagnostics = errors(&program);
    let body_kinds = [
        DiagnosticKind::UndeclaredIdentifier,
        DiagnosticKind::TypeMismatch,
        DiagnosticKind::ArityMismatch,
        DiagnosticKind::UnresolvedClass,
    ];
    assert_eq!(diagnostics.len(), 4);
    assert!(diagnostics.iter().all(|e| body_kinds.contains(&e.kind())));
    assert_eq!(diagnostics.count_of(DiagnosticKind::TypeMismatch), 2);
}

#[test]
fn test_upcast_argument() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[
        b.class("Shape", &[], &[b.field("int", &["id"])]),
        b.class("Square", &["Shape"], &[b.field("int", &["side"])]),
        b.class(
            "Canvas",
            &[],
            &[
                b.method("draw", &[b.receiver("self"), b.param("s", "Shape")], None, &[]),
                b.method(
                    "run",
                    &[b.receiver("self"), b.param("sq", "Square")],
                    None,
                    &[b.expr_stmt(b.call(None, "draw", &[b.var("sq")]))],
                ),
            ],
        ),
    ]);

    let output = compile(&program).unwrap();
    assert!(output.text.contains("struct Square {\n    Shape Shape_part;\n    int side;\n};\n"));
    assert!(output.text.contains("Canvas_draw(self, &sq->Shape_part);"));
}

/// class L { int l; def setl(self, int v) { l = v; } }
/// class R { int r; def setr(self, int v) { r = v; } def getr(self): int { return r; } }
/// class D inherits L, R { def run(self): int { setl(1); setr(2); return getr(); } }
fn two_parents<'a>(b: &TreeBuilder<'a>) -> Vec<cobalt::syntax::ClassDecl<'a>> {
    vec![
        b.class(
            "L",
            &[],
            &[
                b.field("int", &["l"]),
                b.method(
                    "setl",
                    &[b.receiver("self"), b.param("v", "int")],
                    None,
                    &[b.assign("l", b.var("v"))],
                ),
            ],
        ),
        b.class(
            "R",
            &[],
            &[
                b.field("int", &["r"]),
                b.method(
                    "setr",
                    &[b.receiver("self"), b.param("v", "int")],
                    None,
                    &[b.assign("r", b.var("v"))],
                ),
                b.method("getr", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.var("r")))]),
            ],
        ),
        b.class(
            "D",
            &["L", "R"],
            &[b.method(
                "run",
                &[b.receiver("self")],
                Some("int"),
                &[
                    b.expr_stmt(b.call(None, "setl", &[b.int(1)])),
                    b.expr_stmt(b.call(None, "setr", &[b.int(2)])),
                    b.ret(Some(b.call(None, "getr", &[]))),
                ],
            )],
        ),
    ]
}

#[test]
fn test_second_parent_methods_get_their_own_part() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&two_parents(&b));

    let output = compile(&program).unwrap();
    assert!(output.text.contains("struct D {\n    L L_part;\n    R R_part;\n};\n"));
    assert!(output.text.contains("void R_setr(R *self, int v) {\n    self->r = v;\n}\n"));
    assert!(output.text.contains("int R_getr(R *self) {\n    return self->r;\n}\n"));
    assert!(output.text.contains(
        "int D_run(D *self) {\n    \
         L_setl(&self->L_part, 1);\n    \
         R_setr(&self->R_part, 2);\n    \
         return R_getr(&self->R_part);\n\
         }\n"
    ));
}

#[test]
fn test_second_parent_fields_and_upcasts() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let mut classes = two_parents(&b);
    classes.push(b.class(
        "E",
        &["D"],
        &[b.method(
            "bump",
            &[b.receiver("self")],
            Some("int"),
            &[
                b.assign("r", b.binary(b.var("r"), BinaryOp::Add, b.var("l"))),
                b.ret(Some(b.var("r"))),
            ],
        )],
    ));
    classes.push(b.class(
        "User",
        &[],
        &[
            b.field("R", &["held"]),
            b.method(
                "keep",
                &[b.receiver("self"), b.param("e", "E")],
                Some("R"),
                &[
                    b.assign("held", b.var("e")),
                    b.local_init("R", "x", b.var("e")),
                    b.ret(Some(b.var("x"))),
                ],
            ),
        ],
    ));
    let program = b.program(&classes);

    let output = compile(&program).unwrap();
    assert!(output.text.contains(
        "self->D_part.R_part.r = self->D_part.R_part.r + self->D_part.L_part.l;"
    ));
    assert!(output.text.contains("return self->D_part.R_part.r;"));
    assert!(output.text.contains(
        "R *User_keep(User *self, E *e) {\n    \
         self->held = &e->D_part.R_part;\n    \
         R *x = &e->D_part.R_part;\n    \
         return x;\n\
         }\n"
    ));
}

#[test]
fn test_self_referential_class_compiles() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "Node",
        &[],
        &[
            b.field("int", &["value"]),
            b.field("Node", &["next"]),
            b.method("tail", &[b.receiver("self")], Some("Node"), &[b.ret(Some(b.var("next")))]),
        ],
    )]);

    let output = compile(&program).unwrap();
    assert!(output.text.contains("struct Node {\n    int value;\n    Node *next;\n};\n"));
    assert!(output.text.contains("Node *Node_tail(Node *self) {\n    return self->next;\n}\n"));
}

#[test]
fn test_literal_beyond_int_is_rejected() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "A",
        &[],
        &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(4_294_967_297)))])],
    )]);

    let diagnostics = errors(&program);
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::TypeMismatch]);
    assert!(diagnostics.to_string().contains("integer literal 4294967297 does not fit in 'int'"));
}

#[test]
fn test_constructor_is_an_ordinary_function() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[b.class(
        "A",
        &[],
        &[
            b.field("int", &["x"]),
            b.method(
                "__init__",
                &[b.receiver("self"), b.param("x0", "int")],
                None,
                &[b.assign("x", b.var("x0"))],
            ),
        ],
    )]);

    let output = compile(&program).unwrap();
    assert!(output.text.contains("void A___init__(A *self, int x0) {\n    self->x = x0;\n}\n"));
    assert!(!output.text.contains("malloc"));
}

#[test]
fn test_options_shape_the_output() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&inherited_call(&b));

    let options = CompilerOptions::default()
        .with_banner(false)
        .with_indent_width(2);
    let output = compile_with(&program, &options).unwrap();
    assert!(output.text.starts_with("typedef struct A A;\n"));
    assert!(output.text.contains("int A_m(A *self) {\n  return 1;\n}\n"));
}

#[test]
fn test_error_limit_caps_diagnostics() {
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let program = b.program(&[
        b.class("A", &[], &[]),
        b.class("A", &[], &[]),
        b.class("A", &[], &[]),
        b.class("A", &[], &[]),
    ]);

    let diagnostics = compile_with(&program, &CompilerOptions::default().with_error_limit(2)).unwrap_err();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.truncated(), 1);
    assert!(diagnostics.has_errors());
}
