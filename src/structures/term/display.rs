use super::{Op, TermId, TermManager};

/// A term paired with its manager, displayed in SMT-LIB style.
pub struct TermDisplay<'a> {
    manager: &'a TermManager,
    id: TermId,
}

impl TermManager {
    pub fn display(&self, id: TermId) -> TermDisplay<'_> {
        TermDisplay { manager: self, id }
    }
}

impl TermDisplay<'_> {
    fn write_term(&self, f: &mut std::fmt::Formatter<'_>, id: TermId) -> std::fmt::Result {
        let tm = self.manager;
        let head = match tm.op(id) {
            Op::True => return write!(f, "true"),
            Op::False => return write!(f, "false"),
            Op::Const(decl) => return write!(f, "{}", tm.decl(*decl).name),
            Op::Numeral(value, width) => return write!(f, "(_ bv{value} {width})"),

            Op::App(decl) => tm.decl(*decl).name.clone(),
            Op::Not => "not".to_string(),
            Op::And => "and".to_string(),
            Op::Or => "or".to_string(),
            Op::Implies => "=>".to_string(),
            Op::Xor => "xor".to_string(),
            Op::Ite => "ite".to_string(),
            Op::Eq => "=".to_string(),
            Op::Distinct => "distinct".to_string(),
            Op::AtMost(k) => format!("(_ at-most {k})"),
            Op::AtLeast(k) => format!("(_ at-least {k})"),
            Op::BvNot => "bvnot".to_string(),
            Op::BvAnd => "bvand".to_string(),
            Op::BvOr => "bvor".to_string(),
            Op::BvXor => "bvxor".to_string(),
            Op::BvAdd => "bvadd".to_string(),
            Op::BvMul => "bvmul".to_string(),
            Op::BvUle => "bvule".to_string(),
            Op::BvUlt => "bvult".to_string(),
        };

        write!(f, "({head}")?;
        for arg in tm.args(id) {
            write!(f, " ")?;
            self.write_term(f, *arg)?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_term(f, self.id)
    }
}

#[cfg(test)]
mod tests {
    use crate::structures::term::{Sort, TermManager};

    #[test]
    fn smt_style() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::BitVec(4)).unwrap();
        let five = tm.mk_numeral_u64(5, 4).unwrap();
        let eq = tm.mk_eq(x, five).unwrap();
        let not = tm.mk_not(eq).unwrap();
        assert_eq!(format!("{}", tm.display(not)), "(not (= x (_ bv5 4)))");
    }
}
