//! ABC opcodes
//!
//! The AVM2 instruction set as a byte-valued enum, plus the structural
//! classifications the assembler and its consumers rely on: whether an opcode
//! occupies a real control-flow position, whether it branches, and whether it
//! ends fall-through.

/// ABC opcodes
///
/// Stack-machine instruction set. Discriminants are the on-the-wire opcode
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)] // the mnemonic is the documentation
pub enum Opcode {
    // ==================== Basic operations ====================
    Bkpt = 0x01,
    Nop = 0x02,
    Throw = 0x03,
    GetSuper = 0x04,
    SetSuper = 0x05,
    Dxns = 0x06,
    DxnsLate = 0x07,
    Kill = 0x08,
    /// Backward-branch target marker required at loop heads.
    Label = 0x09,

    // ==================== Control flow ====================
    IfNlt = 0x0C,
    IfNle = 0x0D,
    IfNgt = 0x0E,
    IfNge = 0x0F,
    Jump = 0x10,
    IfTrue = 0x11,
    IfFalse = 0x12,
    IfEq = 0x13,
    IfNe = 0x14,
    IfLt = 0x15,
    IfLe = 0x16,
    IfGt = 0x17,
    IfGe = 0x18,
    IfStrictEq = 0x19,
    IfStrictNe = 0x1A,
    LookupSwitch = 0x1B,

    // ==================== Scope stack ====================
    PushWith = 0x1C,
    PopScope = 0x1D,
    NextName = 0x1E,
    HasNext = 0x1F,

    // ==================== Stack & constants ====================
    PushNull = 0x20,
    PushUndefined = 0x21,
    NextValue = 0x23,
    PushByte = 0x24,
    PushShort = 0x25,
    PushTrue = 0x26,
    PushFalse = 0x27,
    PushNan = 0x28,
    Pop = 0x29,
    Dup = 0x2A,
    Swap = 0x2B,
    PushString = 0x2C,
    PushInt = 0x2D,
    PushUint = 0x2E,
    PushDouble = 0x2F,
    PushScope = 0x30,
    PushNamespace = 0x31,
    HasNext2 = 0x32,

    // ==================== Alchemy memory access ====================
    Li8 = 0x35,
    Li16 = 0x36,
    Li32 = 0x37,
    Lf32 = 0x38,
    Lf64 = 0x39,
    Si8 = 0x3A,
    Si16 = 0x3B,
    Si32 = 0x3C,
    Sf32 = 0x3D,
    Sf64 = 0x3E,

    // ==================== Calls & returns ====================
    NewFunction = 0x40,
    Call = 0x41,
    Construct = 0x42,
    CallMethod = 0x43,
    CallStatic = 0x44,
    CallSuper = 0x45,
    CallProperty = 0x46,
    ReturnVoid = 0x47,
    ReturnValue = 0x48,
    ConstructSuper = 0x49,
    ConstructProp = 0x4A,
    CallSuperId = 0x4B,
    CallPropLex = 0x4C,
    CallInterface = 0x4D,
    CallSuperVoid = 0x4E,
    CallPropVoid = 0x4F,

    // ==================== Alchemy sign extension ====================
    Sxi1 = 0x50,
    Sxi8 = 0x51,
    Sxi16 = 0x52,

    // ==================== Object construction ====================
    ApplyType = 0x53,
    NewObject = 0x55,
    NewArray = 0x56,
    NewActivation = 0x57,
    NewClass = 0x58,
    GetDescendants = 0x59,
    NewCatch = 0x5A,

    // ==================== Name resolution ====================
    FindPropStrict = 0x5D,
    FindProperty = 0x5E,
    FindDef = 0x5F,
    GetLex = 0x60,

    // ==================== Properties, locals, slots ====================
    SetProperty = 0x61,
    GetLocal = 0x62,
    SetLocal = 0x63,
    GetGlobalScope = 0x64,
    GetScopeObject = 0x65,
    GetProperty = 0x66,
    GetOuterScope = 0x67,
    InitProperty = 0x68,
    SetPropertyLate = 0x69,
    DeleteProperty = 0x6A,
    DeletePropertyLate = 0x6B,
    GetSlot = 0x6C,
    SetSlot = 0x6D,
    GetGlobalSlot = 0x6E,
    SetGlobalSlot = 0x6F,

    // ==================== Conversions & coercions ====================
    ConvertS = 0x70,
    EscXelem = 0x71,
    EscXattr = 0x72,
    ConvertI = 0x73,
    ConvertU = 0x74,
    ConvertD = 0x75,
    ConvertB = 0x76,
    ConvertO = 0x77,
    CheckFilter = 0x78,
    UnPlus = 0x7A,
    Coerce = 0x80,
    CoerceB = 0x81,
    CoerceA = 0x82,
    CoerceI = 0x83,
    CoerceD = 0x84,
    CoerceS = 0x85,
    AsType = 0x86,
    AsTypeLate = 0x87,
    CoerceU = 0x88,
    CoerceO = 0x89,

    // ==================== Arithmetic & logic ====================
    Negate = 0x90,
    Increment = 0x91,
    IncLocal = 0x92,
    Decrement = 0x93,
    DecLocal = 0x94,
    TypeOf = 0x95,
    Not = 0x96,
    BitNot = 0x97,
    AddD = 0x9B,
    Add = 0xA0,
    Subtract = 0xA1,
    Multiply = 0xA2,
    Divide = 0xA3,
    Modulo = 0xA4,
    Lshift = 0xA5,
    Rshift = 0xA6,
    Urshift = 0xA7,
    BitAnd = 0xA8,
    BitOr = 0xA9,
    BitXor = 0xAA,

    // ==================== Comparisons ====================
    Equals = 0xAB,
    StrictEquals = 0xAC,
    LessThan = 0xAD,
    LessEquals = 0xAE,
    GreaterThan = 0xAF,
    GreaterEquals = 0xB0,
    InstanceOf = 0xB1,
    IsType = 0xB2,
    IsTypeLate = 0xB3,
    In = 0xB4,

    // ==================== Integer-typed arithmetic ====================
    IncrementI = 0xC0,
    DecrementI = 0xC1,
    IncLocalI = 0xC2,
    DecLocalI = 0xC3,
    NegateI = 0xC4,
    AddI = 0xC5,
    SubtractI = 0xC6,
    MultiplyI = 0xC7,

    // ==================== Fixed-register locals ====================
    GetLocal0 = 0xD0,
    GetLocal1 = 0xD1,
    GetLocal2 = 0xD2,
    GetLocal3 = 0xD3,
    SetLocal0 = 0xD4,
    SetLocal1 = 0xD5,
    SetLocal2 = 0xD6,
    SetLocal3 = 0xD7,

    // ==================== Debug information ====================
    Debug = 0xEF,
    DebugLine = 0xF0,
    DebugFile = 0xF1,
    BkptLine = 0xF2,
    Timestamp = 0xF3,
}

impl Opcode {
    /// Convert from a raw opcode byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Bkpt),
            0x02 => Some(Self::Nop),
            0x03 => Some(Self::Throw),
            0x04 => Some(Self::GetSuper),
            0x05 => Some(Self::SetSuper),
            0x06 => Some(Self::Dxns),
            0x07 => Some(Self::DxnsLate),
            0x08 => Some(Self::Kill),
            0x09 => Some(Self::Label),

            0x0C => Some(Self::IfNlt),
            0x0D => Some(Self::IfNle),
            0x0E => Some(Self::IfNgt),
            0x0F => Some(Self::IfNge),
            0x10 => Some(Self::Jump),
            0x11 => Some(Self::IfTrue),
            0x12 => Some(Self::IfFalse),
            0x13 => Some(Self::IfEq),
            0x14 => Some(Self::IfNe),
            0x15 => Some(Self::IfLt),
            0x16 => Some(Self::IfLe),
            0x17 => Some(Self::IfGt),
            0x18 => Some(Self::IfGe),
            0x19 => Some(Self::IfStrictEq),
            0x1A => Some(Self::IfStrictNe),
            0x1B => Some(Self::LookupSwitch),

            0x1C => Some(Self::PushWith),
            0x1D => Some(Self::PopScope),
            0x1E => Some(Self::NextName),
            0x1F => Some(Self::HasNext),

            0x20 => Some(Self::PushNull),
            0x21 => Some(Self::PushUndefined),
            0x23 => Some(Self::NextValue),
            0x24 => Some(Self::PushByte),
            0x25 => Some(Self::PushShort),
            0x26 => Some(Self::PushTrue),
            0x27 => Some(Self::PushFalse),
            0x28 => Some(Self::PushNan),
            0x29 => Some(Self::Pop),
            0x2A => Some(Self::Dup),
            0x2B => Some(Self::Swap),
            0x2C => Some(Self::PushString),
            0x2D => Some(Self::PushInt),
            0x2E => Some(Self::PushUint),
            0x2F => Some(Self::PushDouble),
            0x30 => Some(Self::PushScope),
            0x31 => Some(Self::PushNamespace),
            0x32 => Some(Self::HasNext2),

            0x35 => Some(Self::Li8),
            0x36 => Some(Self::Li16),
            0x37 => Some(Self::Li32),
            0x38 => Some(Self::Lf32),
            0x39 => Some(Self::Lf64),
            0x3A => Some(Self::Si8),
            0x3B => Some(Self::Si16),
            0x3C => Some(Self::Si32),
            0x3D => Some(Self::Sf32),
            0x3E => Some(Self::Sf64),

            0x40 => Some(Self::NewFunction),
            0x41 => Some(Self::Call),
            0x42 => Some(Self::Construct),
            0x43 => Some(Self::CallMethod),
            0x44 => Some(Self::CallStatic),
            0x45 => Some(Self::CallSuper),
            0x46 => Some(Self::CallProperty),
            0x47 => Some(Self::ReturnVoid),
            0x48 => Some(Self::ReturnValue),
            0x49 => Some(Self::ConstructSuper),
            0x4A => Some(Self::ConstructProp),
            0x4B => Some(Self::CallSuperId),
            0x4C => Some(Self::CallPropLex),
            0x4D => Some(Self::CallInterface),
            0x4E => Some(Self::CallSuperVoid),
            0x4F => Some(Self::CallPropVoid),

            0x50 => Some(Self::Sxi1),
            0x51 => Some(Self::Sxi8),
            0x52 => Some(Self::Sxi16),

            0x53 => Some(Self::ApplyType),
            0x55 => Some(Self::NewObject),
            0x56 => Some(Self::NewArray),
            0x57 => Some(Self::NewActivation),
            0x58 => Some(Self::NewClass),
            0x59 => Some(Self::GetDescendants),
            0x5A => Some(Self::NewCatch),

            0x5D => Some(Self::FindPropStrict),
            0x5E => Some(Self::FindProperty),
            0x5F => Some(Self::FindDef),
            0x60 => Some(Self::GetLex),

            0x61 => Some(Self::SetProperty),
            0x62 => Some(Self::GetLocal),
            0x63 => Some(Self::SetLocal),
            0x64 => Some(Self::GetGlobalScope),
            0x65 => Some(Self::GetScopeObject),
            0x66 => Some(Self::GetProperty),
            0x67 => Some(Self::GetOuterScope),
            0x68 => Some(Self::InitProperty),
            0x69 => Some(Self::SetPropertyLate),
            0x6A => Some(Self::DeleteProperty),
            0x6B => Some(Self::DeletePropertyLate),
            0x6C => Some(Self::GetSlot),
            0x6D => Some(Self::SetSlot),
            0x6E => Some(Self::GetGlobalSlot),
            0x6F => Some(Self::SetGlobalSlot),

            0x70 => Some(Self::ConvertS),
            0x71 => Some(Self::EscXelem),
            0x72 => Some(Self::EscXattr),
            0x73 => Some(Self::ConvertI),
            0x74 => Some(Self::ConvertU),
            0x75 => Some(Self::ConvertD),
            0x76 => Some(Self::ConvertB),
            0x77 => Some(Self::ConvertO),
            0x78 => Some(Self::CheckFilter),
            0x7A => Some(Self::UnPlus),
            0x80 => Some(Self::Coerce),
            0x81 => Some(Self::CoerceB),
            0x82 => Some(Self::CoerceA),
            0x83 => Some(Self::CoerceI),
            0x84 => Some(Self::CoerceD),
            0x85 => Some(Self::CoerceS),
            0x86 => Some(Self::AsType),
            0x87 => Some(Self::AsTypeLate),
            0x88 => Some(Self::CoerceU),
            0x89 => Some(Self::CoerceO),

            0x90 => Some(Self::Negate),
            0x91 => Some(Self::Increment),
            0x92 => Some(Self::IncLocal),
            0x93 => Some(Self::Decrement),
            0x94 => Some(Self::DecLocal),
            0x95 => Some(Self::TypeOf),
            0x96 => Some(Self::Not),
            0x97 => Some(Self::BitNot),
            0x9B => Some(Self::AddD),
            0xA0 => Some(Self::Add),
            0xA1 => Some(Self::Subtract),
            0xA2 => Some(Self::Multiply),
            0xA3 => Some(Self::Divide),
            0xA4 => Some(Self::Modulo),
            0xA5 => Some(Self::Lshift),
            0xA6 => Some(Self::Rshift),
            0xA7 => Some(Self::Urshift),
            0xA8 => Some(Self::BitAnd),
            0xA9 => Some(Self::BitOr),
            0xAA => Some(Self::BitXor),

            0xAB => Some(Self::Equals),
            0xAC => Some(Self::StrictEquals),
            0xAD => Some(Self::LessThan),
            0xAE => Some(Self::LessEquals),
            0xAF => Some(Self::GreaterThan),
            0xB0 => Some(Self::GreaterEquals),
            0xB1 => Some(Self::InstanceOf),
            0xB2 => Some(Self::IsType),
            0xB3 => Some(Self::IsTypeLate),
            0xB4 => Some(Self::In),

            0xC0 => Some(Self::IncrementI),
            0xC1 => Some(Self::DecrementI),
            0xC2 => Some(Self::IncLocalI),
            0xC3 => Some(Self::DecLocalI),
            0xC4 => Some(Self::NegateI),
            0xC5 => Some(Self::AddI),
            0xC6 => Some(Self::SubtractI),
            0xC7 => Some(Self::MultiplyI),

            0xD0 => Some(Self::GetLocal0),
            0xD1 => Some(Self::GetLocal1),
            0xD2 => Some(Self::GetLocal2),
            0xD3 => Some(Self::GetLocal3),
            0xD4 => Some(Self::SetLocal0),
            0xD5 => Some(Self::SetLocal1),
            0xD6 => Some(Self::SetLocal2),
            0xD7 => Some(Self::SetLocal3),

            0xEF => Some(Self::Debug),
            0xF0 => Some(Self::DebugLine),
            0xF1 => Some(Self::DebugFile),
            0xF2 => Some(Self::BkptLine),
            0xF3 => Some(Self::Timestamp),

            _ => None,
        }
    }

    /// Convert to the raw opcode byte.
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Get the ABC mnemonic of this opcode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bkpt => "bkpt",
            Self::Nop => "nop",
            Self::Throw => "throw",
            Self::GetSuper => "getsuper",
            Self::SetSuper => "setsuper",
            Self::Dxns => "dxns",
            Self::DxnsLate => "dxnslate",
            Self::Kill => "kill",
            Self::Label => "label",
            Self::IfNlt => "ifnlt",
            Self::IfNle => "ifnle",
            Self::IfNgt => "ifngt",
            Self::IfNge => "ifnge",
            Self::Jump => "jump",
            Self::IfTrue => "iftrue",
            Self::IfFalse => "iffalse",
            Self::IfEq => "ifeq",
            Self::IfNe => "ifne",
            Self::IfLt => "iflt",
            Self::IfLe => "ifle",
            Self::IfGt => "ifgt",
            Self::IfGe => "ifge",
            Self::IfStrictEq => "ifstricteq",
            Self::IfStrictNe => "ifstrictne",
            Self::LookupSwitch => "lookupswitch",
            Self::PushWith => "pushwith",
            Self::PopScope => "popscope",
            Self::NextName => "nextname",
            Self::HasNext => "hasnext",
            Self::PushNull => "pushnull",
            Self::PushUndefined => "pushundefined",
            Self::NextValue => "nextvalue",
            Self::PushByte => "pushbyte",
            Self::PushShort => "pushshort",
            Self::PushTrue => "pushtrue",
            Self::PushFalse => "pushfalse",
            Self::PushNan => "pushnan",
            Self::Pop => "pop",
            Self::Dup => "dup",
            Self::Swap => "swap",
            Self::PushString => "pushstring",
            Self::PushInt => "pushint",
            Self::PushUint => "pushuint",
            Self::PushDouble => "pushdouble",
            Self::PushScope => "pushscope",
            Self::PushNamespace => "pushnamespace",
            Self::HasNext2 => "hasnext2",
            Self::Li8 => "li8",
            Self::Li16 => "li16",
            Self::Li32 => "li32",
            Self::Lf32 => "lf32",
            Self::Lf64 => "lf64",
            Self::Si8 => "si8",
            Self::Si16 => "si16",
            Self::Si32 => "si32",
            Self::Sf32 => "sf32",
            Self::Sf64 => "sf64",
            Self::NewFunction => "newfunction",
            Self::Call => "call",
            Self::Construct => "construct",
            Self::CallMethod => "callmethod",
            Self::CallStatic => "callstatic",
            Self::CallSuper => "callsuper",
            Self::CallProperty => "callproperty",
            Self::ReturnVoid => "returnvoid",
            Self::ReturnValue => "returnvalue",
            Self::ConstructSuper => "constructsuper",
            Self::ConstructProp => "constructprop",
            Self::CallSuperId => "callsuperid",
            Self::CallPropLex => "callproplex",
            Self::CallInterface => "callinterface",
            Self::CallSuperVoid => "callsupervoid",
            Self::CallPropVoid => "callpropvoid",
            Self::Sxi1 => "sxi1",
            Self::Sxi8 => "sxi8",
            Self::Sxi16 => "sxi16",
            Self::ApplyType => "applytype",
            Self::NewObject => "newobject",
            Self::NewArray => "newarray",
            Self::NewActivation => "newactivation",
            Self::NewClass => "newclass",
            Self::GetDescendants => "getdescendants",
            Self::NewCatch => "newcatch",
            Self::FindPropStrict => "findpropstrict",
            Self::FindProperty => "findproperty",
            Self::FindDef => "finddef",
            Self::GetLex => "getlex",
            Self::SetProperty => "setproperty",
            Self::GetLocal => "getlocal",
            Self::SetLocal => "setlocal",
            Self::GetGlobalScope => "getglobalscope",
            Self::GetScopeObject => "getscopeobject",
            Self::GetProperty => "getproperty",
            Self::GetOuterScope => "getouterscope",
            Self::InitProperty => "initproperty",
            Self::SetPropertyLate => "setpropertylate",
            Self::DeleteProperty => "deleteproperty",
            Self::DeletePropertyLate => "deletepropertylate",
            Self::GetSlot => "getslot",
            Self::SetSlot => "setslot",
            Self::GetGlobalSlot => "getglobalslot",
            Self::SetGlobalSlot => "setglobalslot",
            Self::ConvertS => "convert_s",
            Self::EscXelem => "esc_xelem",
            Self::EscXattr => "esc_xattr",
            Self::ConvertI => "convert_i",
            Self::ConvertU => "convert_u",
            Self::ConvertD => "convert_d",
            Self::ConvertB => "convert_b",
            Self::ConvertO => "convert_o",
            Self::CheckFilter => "checkfilter",
            Self::UnPlus => "unplus",
            Self::Coerce => "coerce",
            Self::CoerceB => "coerce_b",
            Self::CoerceA => "coerce_a",
            Self::CoerceI => "coerce_i",
            Self::CoerceD => "coerce_d",
            Self::CoerceS => "coerce_s",
            Self::AsType => "astype",
            Self::AsTypeLate => "astypelate",
            Self::CoerceU => "coerce_u",
            Self::CoerceO => "coerce_o",
            Self::Negate => "negate",
            Self::Increment => "increment",
            Self::IncLocal => "inclocal",
            Self::Decrement => "decrement",
            Self::DecLocal => "declocal",
            Self::TypeOf => "typeof",
            Self::Not => "not",
            Self::BitNot => "bitnot",
            Self::AddD => "add_d",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Lshift => "lshift",
            Self::Rshift => "rshift",
            Self::Urshift => "urshift",
            Self::BitAnd => "bitand",
            Self::BitOr => "bitor",
            Self::BitXor => "bitxor",
            Self::Equals => "equals",
            Self::StrictEquals => "strictequals",
            Self::LessThan => "lessthan",
            Self::LessEquals => "lessequals",
            Self::GreaterThan => "greaterthan",
            Self::GreaterEquals => "greaterequals",
            Self::InstanceOf => "instanceof",
            Self::IsType => "istype",
            Self::IsTypeLate => "istypelate",
            Self::In => "in",
            Self::IncrementI => "increment_i",
            Self::DecrementI => "decrement_i",
            Self::IncLocalI => "inclocal_i",
            Self::DecLocalI => "declocal_i",
            Self::NegateI => "negate_i",
            Self::AddI => "add_i",
            Self::SubtractI => "subtract_i",
            Self::MultiplyI => "multiply_i",
            Self::GetLocal0 => "getlocal0",
            Self::GetLocal1 => "getlocal1",
            Self::GetLocal2 => "getlocal2",
            Self::GetLocal3 => "getlocal3",
            Self::SetLocal0 => "setlocal0",
            Self::SetLocal1 => "setlocal1",
            Self::SetLocal2 => "setlocal2",
            Self::SetLocal3 => "setlocal3",
            Self::Debug => "debug",
            Self::DebugLine => "debugline",
            Self::DebugFile => "debugfile",
            Self::BkptLine => "bkptline",
            Self::Timestamp => "timestamp",
        }
    }

    /// An executable opcode occupies a real control-flow position; debug
    /// markers do not, and pending labels skip over them.
    #[inline]
    pub const fn is_executable(self) -> bool {
        !matches!(self, Self::Debug | Self::DebugLine | Self::DebugFile)
    }

    /// True for opcodes that transfer control to a Label operand.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Jump
                | Self::IfTrue
                | Self::IfFalse
                | Self::IfEq
                | Self::IfNe
                | Self::IfLt
                | Self::IfLe
                | Self::IfGt
                | Self::IfGe
                | Self::IfNlt
                | Self::IfNle
                | Self::IfNgt
                | Self::IfNge
                | Self::IfStrictEq
                | Self::IfStrictNe
                | Self::LookupSwitch
        )
    }

    /// True if this opcode is structurally permitted to carry Label operands.
    #[inline]
    pub const fn is_targetable(self) -> bool {
        self.is_branch()
    }

    /// True for opcodes after which execution can never continue to the next
    /// instruction in sequence.
    #[inline]
    pub const fn is_unconditional_transfer(self) -> bool {
        matches!(
            self,
            Self::ReturnVoid | Self::ReturnValue | Self::Jump | Self::Throw
        )
    }

    /// True for opcodes that end a basic block: any branch, return, or throw.
    #[inline]
    pub const fn is_transfer_of_control(self) -> bool {
        self.is_branch()
            || matches!(self, Self::ReturnVoid | Self::ReturnValue | Self::Throw)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_round_trip() {
        for byte in 0..=u8::MAX {
            if let Some(op) = Opcode::from_byte(byte) {
                assert_eq!(op.to_byte(), byte);
            }
        }
    }

    #[test]
    fn test_executable_classification() {
        assert!(Opcode::Add.is_executable());
        assert!(Opcode::Label.is_executable());
        assert!(!Opcode::Debug.is_executable());
        assert!(!Opcode::DebugLine.is_executable());
        assert!(!Opcode::DebugFile.is_executable());
    }

    #[test]
    fn test_branch_classification() {
        assert!(Opcode::Jump.is_branch());
        assert!(Opcode::IfStrictNe.is_branch());
        assert!(Opcode::LookupSwitch.is_branch());
        assert!(!Opcode::ReturnVoid.is_branch());
        assert!(!Opcode::Add.is_branch());
    }

    #[test]
    fn test_unconditional_transfer() {
        for op in [
            Opcode::ReturnVoid,
            Opcode::ReturnValue,
            Opcode::Jump,
            Opcode::Throw,
        ] {
            assert!(op.is_unconditional_transfer(), "{op}");
            assert!(op.is_transfer_of_control(), "{op}");
        }
        assert!(!Opcode::IfTrue.is_unconditional_transfer());
        assert!(Opcode::IfTrue.is_transfer_of_control());
    }
}
