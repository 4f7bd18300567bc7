//! The scope stack.
//!
//! Every lexical environment the parser enters pushes a scope; popping a
//! scope propagates the names it could not resolve into its parent as
//! closed-variable candidates, which is how captured-variable sets are
//! computed without a second pass.

use ahash::RandomState;
use bitflags::bitflags;
use hashbrown::{HashMap, HashSet};

use crate::ast::{names, ConstructorKind, FunctionKind, Ident};
use crate::syn::token::Span;

bitflags! {
	/// The result of a declaration attempt. An empty set means the
	/// declaration is valid; the caller decides which bits are fatal.
	#[derive(Clone, Copy, Eq, PartialEq, Debug)]
	pub struct DeclarationResult: u8 {
		/// The name is reserved in strict mode (`eval`/`arguments`).
		const INVALID_STRICT_MODE = 1 << 0;
		/// The name collides with an existing binding.
		const INVALID_DUPLICATE = 1 << 1;
	}
}

/// Whether a function expects a `super` binding from its caller.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[non_exhaustive]
pub enum SuperBinding {
	#[default]
	NotNeeded,
	Needed,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub enum ScopeKind {
	/// A function body, also used for the program itself.
	Function,
	Block,
	Catch,
	Module,
	With,
	Switch,
}

type Set<T> = HashSet<T, RandomState>;
type Map<K, V> = HashMap<K, V, RandomState>;

/// A label visible in a scope, with whether it labels a loop.
#[derive(Clone, Copy, Debug)]
pub struct Label {
	pub name: Ident,
	pub is_loop: bool,
}

/// One lexical environment.
#[derive(Debug)]
#[non_exhaustive]
pub struct Scope {
	pub kind: ScopeKind,
	pub strict: bool,
	/// Only set on function scopes.
	pub function_kind: Option<FunctionKind>,
	pub constructor_kind: ConstructorKind,
	pub expected_super_binding: SuperBinding,
	pub is_generator: bool,
	/// The body scope of a generator, where `yield` is an expression.
	pub is_generator_body: bool,
	pub has_direct_super: bool,
	pub needs_full_activation: bool,
	/// Set on the scope of the program itself, which is function-like but
	/// not a real function for `new.target` and `return` purposes.
	pub is_program_root: bool,
	var_names: Set<Ident>,
	lexical_names: Set<Ident>,
	param_names: Set<Ident>,
	used_names: Set<Ident>,
	closed_candidates: Set<Ident>,
	labels: Vec<Label>,
	/// Exported local bindings, validated at end of parse. Only used on
	/// module scopes.
	pub exported: Map<Ident, Span>,
	/// Free variables, filled in when the scope is popped.
	pub captured: Vec<Ident>,
}

impl Scope {
	fn new(kind: ScopeKind, strict: bool) -> Self {
		Scope {
			kind,
			strict,
			function_kind: None,
			constructor_kind: ConstructorKind::None,
			expected_super_binding: SuperBinding::NotNeeded,
			is_generator: false,
			is_generator_body: false,
			has_direct_super: false,
			needs_full_activation: false,
			is_program_root: false,
			var_names: Set::default(),
			lexical_names: Set::default(),
			param_names: Set::default(),
			used_names: Set::default(),
			closed_candidates: Set::default(),
			labels: Vec::new(),
			exported: Map::default(),
			captured: Vec::new(),
		}
	}

	pub fn function(kind: FunctionKind, strict: bool) -> Self {
		let mut scope = Scope::new(ScopeKind::Function, strict);
		scope.function_kind = Some(kind);
		scope
	}

	pub fn module() -> Self {
		// Module code is always strict.
		Scope::new(ScopeKind::Module, true)
	}

	pub fn block(strict: bool) -> Self {
		Scope::new(ScopeKind::Block, strict)
	}

	pub fn catch(strict: bool) -> Self {
		Scope::new(ScopeKind::Catch, strict)
	}

	pub fn with(strict: bool) -> Self {
		Scope::new(ScopeKind::With, strict)
	}

	pub fn switch(strict: bool) -> Self {
		Scope::new(ScopeKind::Switch, strict)
	}

	/// Returns whether `var` declarations and function hoisting stop at this
	/// scope.
	pub fn is_function_boundary(&self) -> bool {
		matches!(self.kind, ScopeKind::Function | ScopeKind::Module)
	}

	pub fn is_arrow(&self) -> bool {
		self.function_kind == Some(FunctionKind::Arrow)
	}

	pub fn declares(&self, name: Ident) -> bool {
		self.var_names.contains(&name)
			|| self.lexical_names.contains(&name)
			|| self.param_names.contains(&name)
	}

	pub fn declares_parameter(&self, name: Ident) -> bool {
		self.param_names.contains(&name)
	}

	/// The hoisted `var` names of this scope, in deterministic order.
	pub fn var_names_sorted(&self) -> Vec<Ident> {
		let mut names: Vec<Ident> = self.var_names.iter().copied().collect();
		names.sort_unstable();
		names
	}

	/// The free variables of this scope: every name used here or closed
	/// over by a descendant which this scope does not declare.
	fn free_variables(&self) -> Vec<Ident> {
		let mut free: Vec<Ident> = self
			.used_names
			.iter()
			.chain(self.closed_candidates.iter())
			.filter(|name| !self.declares(**name))
			.copied()
			.collect();
		free.sort_unstable();
		free.dedup();
		free
	}
}

fn strict_name_check(strict: bool, name: Ident) -> DeclarationResult {
	if strict && (name == names::EVAL || name == names::ARGUMENTS) {
		DeclarationResult::INVALID_STRICT_MODE
	} else {
		DeclarationResult::empty()
	}
}

/// The stack of scopes of a single parse.
///
/// Always empty at parser construction and at the end of a parse, on both
/// success and error paths.
#[derive(Debug, Default)]
pub struct ScopeStack {
	scopes: Vec<Scope>,
}

impl ScopeStack {
	pub fn new() -> Self {
		ScopeStack {
			scopes: Vec::new(),
		}
	}

	pub fn depth(&self) -> usize {
		self.scopes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.scopes.is_empty()
	}

	pub fn push(&mut self, scope: Scope) {
		self.scopes.push(scope);
	}

	/// Push a scope inheriting the current strict mode.
	pub fn push_inheriting(&mut self, kind: ScopeKind) {
		let strict = self.strict();
		let scope = match kind {
			ScopeKind::Block => Scope::block(strict),
			ScopeKind::Catch => Scope::catch(strict),
			ScopeKind::With => Scope::with(strict),
			ScopeKind::Switch => Scope::switch(strict),
			ScopeKind::Function => Scope::function(FunctionKind::Normal, strict),
			ScopeKind::Module => Scope::module(),
		};
		self.scopes.push(scope);
	}

	/// Pop the current scope, propagating its free variables into the
	/// parent as closed-variable candidates.
	pub fn pop(&mut self) -> Scope {
		let mut scope = self.scopes.pop().expect("scope stack underflow");
		scope.captured = scope.free_variables();
		if let Some(parent) = self.scopes.last_mut() {
			for name in scope.captured.iter() {
				parent.closed_candidates.insert(*name);
			}
		}
		scope
	}

	/// Pop the current scope without propagating anything, for scopes pushed
	/// during a speculative parse.
	pub fn pop_discard(&mut self) -> Scope {
		self.scopes.pop().expect("scope stack underflow")
	}

	/// Discard scopes down to the given depth, used by savepoint rollback.
	pub fn truncate(&mut self, depth: usize) {
		self.scopes.truncate(depth);
	}

	pub fn current(&self) -> &Scope {
		self.scopes.last().expect("scope stack is empty")
	}

	pub fn current_mut(&mut self) -> &mut Scope {
		self.scopes.last_mut().expect("scope stack is empty")
	}

	pub fn strict(&self) -> bool {
		self.scopes.last().map(|x| x.strict).unwrap_or(false)
	}

	/// Flip the current scope, and every scope it directly feeds, to strict.
	///
	/// Strict mode is monotone within a scope once set.
	pub fn set_strict(&mut self) {
		if let Some(x) = self.scopes.last_mut() {
			x.strict = true;
		}
	}

	/// The nearest enclosing function or module scope.
	pub fn current_function(&self) -> Option<&Scope> {
		self.scopes.iter().rev().find(|x| x.is_function_boundary())
	}

	pub fn current_function_mut(&mut self) -> Option<&mut Scope> {
		self.scopes.iter_mut().rev().find(|x| x.is_function_boundary())
	}

	/// The nearest enclosing function scope that is not an arrow function.
	///
	/// `super` and `this` semantics of arrow functions delegate to this
	/// scope; walking the stack avoids parent backreferences.
	pub fn closest_non_arrow_function(&self) -> Option<&Scope> {
		self.scopes.iter().rev().find(|x| x.is_function_boundary() && !x.is_arrow())
	}

	pub fn closest_non_arrow_function_mut(&mut self) -> Option<&mut Scope> {
		self.scopes.iter_mut().rev().find(|x| x.is_function_boundary() && !x.is_arrow())
	}

	/// Whether the parser is inside a generator, either its wrapper or its
	/// body, looking through arrow functions.
	pub fn in_generator(&self) -> bool {
		self.closest_non_arrow_function().map(|x| x.is_generator).unwrap_or(false)
	}

	/// Whether the parser is inside a generator body, where `yield` is an
	/// expression keyword. Arrow functions inherit this lexically.
	pub fn in_generator_body(&self) -> bool {
		self.closest_non_arrow_function().map(|x| x.is_generator_body).unwrap_or(false)
	}

	/// Whether the parser is inside a real function, not counting the
	/// program root scope.
	pub fn inside_function(&self) -> bool {
		self.current_function().map(|x| !x.is_program_root).unwrap_or(false)
	}

	/// Record a use of a name in the current scope.
	pub fn use_name(&mut self, name: Ident) {
		if let Some(x) = self.scopes.last_mut() {
			x.used_names.insert(name);
		}
	}

	/// Returns whether the name resolves to a declaration in the nearest
	/// function boundary scope. Used for end-of-parse export validation.
	pub fn is_declared_in_current_function(&self, name: Ident) -> bool {
		for scope in self.scopes.iter().rev() {
			if scope.declares(name) {
				return true;
			}
			if scope.is_function_boundary() {
				return false;
			}
		}
		false
	}

	/// Declare a `var` binding. The binding hoists to the nearest function
	/// boundary; it is a duplicate only when it collides with a lexical
	/// binding on the way up.
	pub fn declare_var(&mut self, name: Ident) -> DeclarationResult {
		let mut result = strict_name_check(self.strict(), name);
		for scope in self.scopes.iter_mut().rev() {
			if scope.lexical_names.contains(&name) {
				result |= DeclarationResult::INVALID_DUPLICATE;
			}
			if scope.is_function_boundary() {
				scope.var_names.insert(name);
				break;
			}
		}
		result
	}

	/// Declare a lexical (`let`/`const`/`class`/import) binding in the
	/// current scope. Any collision is a duplicate.
	pub fn declare_lexical(&mut self, name: Ident) -> DeclarationResult {
		let mut result = strict_name_check(self.strict(), name);
		let scope = self.current_mut();
		if scope.lexical_names.contains(&name)
			|| scope.var_names.contains(&name)
			|| scope.param_names.contains(&name)
		{
			result |= DeclarationResult::INVALID_DUPLICATE;
		}
		scope.lexical_names.insert(name);
		result
	}

	/// Declare a function parameter in the current (function) scope.
	///
	/// Duplicates are reported; whether they are fatal depends on the shape
	/// of the parameter list and is the caller's decision.
	pub fn declare_parameter(&mut self, name: Ident) -> DeclarationResult {
		let mut result = strict_name_check(self.strict(), name);
		let scope = self.current_mut();
		if scope.param_names.contains(&name) {
			result |= DeclarationResult::INVALID_DUPLICATE;
		}
		scope.param_names.insert(name);
		result
	}

	/// Push a label onto the current scope.
	pub fn push_label(&mut self, name: Ident, is_loop: bool) {
		self.current_mut().labels.push(Label {
			name,
			is_loop,
		});
	}

	pub fn pop_label(&mut self) {
		self.current_mut().labels.pop();
	}

	/// Find a label by name, looking through scopes up to the enclosing
	/// function boundary.
	pub fn find_label(&self, name: Ident) -> Option<Label> {
		for scope in self.scopes.iter().rev() {
			if let Some(label) = scope.labels.iter().rev().find(|x| x.name == name) {
				return Some(*label);
			}
			if scope.is_function_boundary() {
				break;
			}
		}
		None
	}

	/// Record an exported local binding on the module scope.
	///
	/// Returns false when the name was already exported.
	pub fn add_export(&mut self, name: Ident, span: Span) -> bool {
		let Some(scope) = self.scopes.iter_mut().rev().find(|x| x.kind == ScopeKind::Module)
		else {
			return true;
		};
		scope.exported.insert(name, span).is_none()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::ast::Interner;

	#[test]
	fn var_does_not_shadow_lexical() {
		let mut interner = Interner::new();
		let x = interner.intern("x");
		let mut scopes = ScopeStack::new();
		scopes.push(Scope::function(FunctionKind::Normal, false));
		assert!(scopes.declare_lexical(x).is_empty());
		assert_eq!(scopes.declare_var(x), DeclarationResult::INVALID_DUPLICATE);
		scopes.pop();
		assert!(scopes.is_empty());
	}

	#[test]
	fn var_hoists_past_blocks() {
		let mut interner = Interner::new();
		let x = interner.intern("x");
		let mut scopes = ScopeStack::new();
		scopes.push(Scope::function(FunctionKind::Normal, false));
		scopes.push(Scope::block(false));
		assert!(scopes.declare_var(x).is_empty());
		scopes.pop();
		assert!(scopes.current().var_names.contains(&x));
		scopes.pop();
	}

	#[test]
	fn lexical_duplicate() {
		let mut interner = Interner::new();
		let x = interner.intern("x");
		let mut scopes = ScopeStack::new();
		scopes.push(Scope::function(FunctionKind::Normal, false));
		assert!(scopes.declare_lexical(x).is_empty());
		assert_eq!(scopes.declare_lexical(x), DeclarationResult::INVALID_DUPLICATE);
		scopes.pop();
	}

	#[test]
	fn strict_eval_binding() {
		let mut scopes = ScopeStack::new();
		scopes.push(Scope::function(FunctionKind::Normal, true));
		assert_eq!(
			scopes.declare_lexical(names::EVAL),
			DeclarationResult::INVALID_STRICT_MODE
		);
		scopes.pop();
	}

	#[test]
	fn captured_propagation() {
		let mut interner = Interner::new();
		let x = interner.intern("x");
		let y = interner.intern("y");
		let mut scopes = ScopeStack::new();
		scopes.push(Scope::function(FunctionKind::Normal, false));
		assert!(scopes.declare_var(x).is_empty());
		// Inner function uses x and its own y.
		scopes.push(Scope::function(FunctionKind::Normal, false));
		assert!(scopes.declare_var(y).is_empty());
		scopes.use_name(x);
		scopes.use_name(y);
		let inner = scopes.pop();
		assert_eq!(inner.captured, vec![x]);
		// The use of x propagated into the outer scope, which resolves it.
		let outer = scopes.pop();
		assert!(outer.captured.is_empty());
		assert!(scopes.is_empty());
	}
}
