use std::fmt;

/// One demo in the fixed menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DemoId {
    State = 1,
    Effect,
    Reducer,
    Context,
    Callback,
    Memo,
    Ref,
    CustomHooks,
    Id,
    LayoutEffect,
    Transition,
    Deferred,
}

impl DemoId {
    /// Resolves a selection id. Anything outside the menu resolves to the
    /// first entry.
    pub fn from_id(id: u8) -> DemoId {
        match id {
            1 => DemoId::State,
            2 => DemoId::Effect,
            3 => DemoId::Reducer,
            4 => DemoId::Context,
            5 => DemoId::Callback,
            6 => DemoId::Memo,
            7 => DemoId::Ref,
            8 => DemoId::CustomHooks,
            9 => DemoId::Id,
            10 => DemoId::LayoutEffect,
            11 => DemoId::Transition,
            12 => DemoId::Deferred,
            _ => DemoId::State,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn entry(self) -> &'static MenuEntry {
        &MENU[usize::from(self.id()) - 1]
    }
}

impl fmt::Display for DemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry().name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: DemoId,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const MENU: [MenuEntry; 12] = [
    MenuEntry { id: DemoId::State, name: "useState", icon: "🎣" },
    MenuEntry { id: DemoId::Effect, name: "useEffect", icon: "⏱️" },
    MenuEntry { id: DemoId::Reducer, name: "useReducer", icon: "🔄" },
    MenuEntry { id: DemoId::Context, name: "useContext", icon: "🌍" },
    MenuEntry { id: DemoId::Callback, name: "useCallback", icon: "📌" },
    MenuEntry { id: DemoId::Memo, name: "useMemo", icon: "💾" },
    MenuEntry { id: DemoId::Ref, name: "useRef", icon: "🎯" },
    MenuEntry { id: DemoId::CustomHooks, name: "Custom Hooks", icon: "🪝" },
    MenuEntry { id: DemoId::Id, name: "useId", icon: "🆔" },
    MenuEntry { id: DemoId::LayoutEffect, name: "useLayoutEffect", icon: "⏰" },
    MenuEntry { id: DemoId::Transition, name: "useTransition", icon: "⚡" },
    MenuEntry { id: DemoId::Deferred, name: "useDeferredValue", icon: "⏳" },
];

/// A menu entry as presented, with the active marker resolved.
#[derive(Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub entry: &'static MenuEntry,
    pub active: bool,
}
