//! Class parsing.

#![cfg(feature = "es6-class")]

use reblessive::Stk;

use crate::ast::{names, ConstructorKind, FunctionKind, Ident, MethodKind};
use crate::syn::parser::builder::{ClassMemberParts, PropKey};
use crate::syn::parser::mac::{bail, expected, unexpected};
use crate::syn::parser::{ParseResult, Parser, Scope, SuperBinding, TreeBuild};
use crate::syn::token::{t, Keyword, Span, TokenKind};

impl<B: TreeBuild> Parser<'_, B> {
	/// Parse a class from after the `class` keyword: optional name,
	/// optional `extends` clause, and the body.
	///
	/// Returns the class name so declaration callers can bind it in the
	/// enclosing scope; the name itself is declared inside the class scope
	/// so methods can refer to it.
	pub(crate) async fn parse_class_tail(
		&mut self,
		ctx: &mut Stk,
		start: Span,
		require_name: bool,
	) -> ParseResult<(Option<Ident>, B::Class)> {
		// A class body is always strict code.
		self.scopes.push(Scope::block(true));

		let res = self.parse_class_tail_inner(ctx, start, require_name).await;
		if res.is_ok() {
			self.scopes.pop();
		}
		res
	}

	async fn parse_class_tail_inner(
		&mut self,
		ctx: &mut Stk,
		start: Span,
		require_name: bool,
	) -> ParseResult<(Option<Ident>, B::Class)> {
		let token = self.peek();
		let name = if matches!(token.kind, TokenKind::Identifier)
			|| token.kind.can_be_identifier()
		{
			let name = self.parse_binding_identifier()?;
			let result = self.scopes.declare_lexical(name);
			if result.contains(crate::syn::parser::DeclarationResult::INVALID_STRICT_MODE) {
				let text = self.interner.resolve(name).to_owned();
				bail!("Cannot use '{text}' as a class name"; @self.last_span());
			}
			Some(name)
		} else {
			if require_name {
				unexpected!(self, token, "a class name");
			}
			None
		};

		let parent = if self.eat(t!("extends")) {
			Some(ctx.run(|ctx| self.parse_member_expr(ctx)).await?)
		} else {
			None
		};
		let constructor_kind = if parent.is_some() {
			ConstructorKind::Derived
		} else {
			ConstructorKind::Base
		};

		let open = expected!(self, t!("{"));
		let mut constructor: Option<B::Function> = None;
		let mut instance_members: Vec<ClassMemberParts<B::Expr, B::Function>> = Vec::new();
		let mut static_members: Vec<ClassMemberParts<B::Expr, B::Function>> = Vec::new();

		loop {
			if self.eat(t!("}")) {
				break;
			}
			if self.eat(t!(";")) {
				continue;
			}
			if self.peek().is_eof() {
				self.expect_closing_delimiter(t!("}"), open.span)?;
			}

			let member_start = self.peek();
			// `static` is a modifier unless it is itself the method name.
			let is_static = if member_start.kind == TokenKind::Keyword(Keyword::Static) {
				if self.peek1().kind == t!("(") {
					false
				} else {
					self.pop_peek();
					true
				}
			} else {
				false
			};

			let member =
				ctx.run(|ctx| self.parse_class_member(ctx, is_static, constructor_kind)).await?;

			match member {
				ClassMemberOutcome::Constructor(function) => {
					if constructor.is_some() {
						bail!("Cannot declare multiple constructors in a single class"; @member_start.span.covers(self.last_span()));
					}
					constructor = Some(function);
				}
				ClassMemberOutcome::Member(member) => {
					if is_static {
						static_members.push(member);
					} else {
						instance_members.push(member);
					}
				}
			}
		}

		let span = start.covers(self.last_span());
		let class = self.builder.class(
			name,
			parent,
			constructor,
			instance_members,
			static_members,
			span,
		);
		Ok((name, class))
	}

	/// Parse one class member, dispatching on generator stars, accessors,
	/// and the `constructor` special case.
	async fn parse_class_member(
		&mut self,
		ctx: &mut Stk,
		is_static: bool,
		class_constructor_kind: ConstructorKind,
	) -> ParseResult<ClassMemberOutcome<B>> {
		let start = self.peek();

		#[cfg(feature = "es6-generators")]
		if start.kind == t!("*") {
			self.pop_peek();
			let key = self.parse_property_key(ctx).await?;
			self.check_member_name(&key, is_static, start.span, MemberFlavour::Generator)?;
			let function = self
				.parse_method_function(ctx, FunctionKind::Generator, key.static_name())
				.await?;
			let span = start.span.covers(self.last_span());
			return Ok(ClassMemberOutcome::Member(ClassMemberParts {
				key,
				kind: MethodKind::Method,
				function,
				span,
			}));
		}

		if start.kind == TokenKind::Identifier {
			let name = self.ident_value(start);
			if (name == names::GET || name == names::SET) && self.peek1().kind != t!("(") {
				self.pop_peek();
				let key = self.parse_property_key(ctx).await?;
				self.check_member_name(&key, is_static, start.span, MemberFlavour::Accessor)?;
				let (kind, fn_kind) = if name == names::GET {
					(MethodKind::Getter, FunctionKind::Getter)
				} else {
					(MethodKind::Setter, FunctionKind::Setter)
				};
				let function =
					self.parse_method_function(ctx, fn_kind, key.static_name()).await?;
				let span = start.span.covers(self.last_span());
				return Ok(ClassMemberOutcome::Member(ClassMemberParts {
					key,
					kind,
					function,
					span,
				}));
			}
		}

		let key = self.parse_property_key(ctx).await?;
		let is_constructor = !is_static && key.static_name() == Some(names::CONSTRUCTOR);
		self.check_member_name(&key, is_static, start.span, MemberFlavour::Method)?;

		if is_constructor {
			// The explicit constructor replaces the synthesized default one.
			let function = self
				.parse_method_function_with(
					ctx,
					FunctionKind::Method,
					Some(names::CONSTRUCTOR),
					class_constructor_kind,
					SuperBinding::Needed,
				)
				.await?;
			return Ok(ClassMemberOutcome::Constructor(function));
		}

		let function = self
			.parse_method_function(ctx, FunctionKind::Method, key.static_name())
			.await?;
		let span = start.span.covers(self.last_span());
		Ok(ClassMemberOutcome::Member(ClassMemberParts {
			key,
			kind: MethodKind::Method,
			function,
			span,
		}))
	}

	fn check_member_name(
		&mut self,
		key: &PropKey<B::Expr>,
		is_static: bool,
		span: Span,
		flavour: MemberFlavour,
	) -> ParseResult<()> {
		let Some(name) = key.static_name() else {
			return Ok(());
		};
		if is_static && name == names::PROTOTYPE {
			bail!("Cannot declare a static method named 'prototype'"; @span);
		}
		if !is_static && name == names::CONSTRUCTOR {
			match flavour {
				MemberFlavour::Accessor => {
					bail!("Cannot declare a getter or setter named 'constructor'"; @span);
				}
				MemberFlavour::Generator => {
					bail!("Cannot declare a generator function named 'constructor'"; @span);
				}
				MemberFlavour::Method => {}
			}
		}
		Ok(())
	}
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum MemberFlavour {
	Method,
	Accessor,
	Generator,
}

/// What parsing one class member produced.
enum ClassMemberOutcome<B: TreeBuild> {
	Constructor(B::Function),
	Member(ClassMemberParts<B::Expr, B::Function>),
}
