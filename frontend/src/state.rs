//! 请求状态抽象
//!
//! 列表加载统一用一个枚举表达，取代散落在各页面的
//! loading / error / success 布尔三件套。

/// 一次请求的生命周期状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T> {
    /// 尚未发起
    #[default]
    Idle,
    /// 进行中
    Pending,
    /// 成功，携带数据
    Success(T),
    /// 失败，携带用户可读的原因
    Failure(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T: Clone> RequestState<Vec<T>> {
    /// 列表便捷读取：非成功状态一律视为空列表
    pub fn items(&self) -> Vec<T> {
        match self {
            RequestState::Success(list) => list.clone(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_accessors() {
        let mut state: RequestState<Vec<u32>> = RequestState::Idle;
        assert!(!state.is_pending());
        assert!(state.success().is_none());

        state = RequestState::Pending;
        assert!(state.is_pending());

        state = RequestState::Success(vec![1, 2]);
        assert_eq!(state.success().unwrap().len(), 2);
        assert_eq!(state.items(), vec![1, 2]);

        state = RequestState::Failure("网络错误".into());
        assert_eq!(state.failure(), Some("网络错误"));
        // 失败状态下列表读取降级为空
        assert!(state.items().is_empty());
    }
}
