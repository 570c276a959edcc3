use std::any::Any;

use async_trait::async_trait;
use scenario_core::ResourceHandle;

use crate::step::ScenarioStep;

pub(crate) type ErasedValue = Box<dyn Any + Send>;

#[async_trait]
pub(crate) trait ErasedStep<Ctx, Err>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute_erased(
        &self,
        ctx: &Ctx,
        input: ErasedValue,
    ) -> Result<(ErasedValue, Vec<ResourceHandle>), Err>;

    async fn compensate_erased(&self, ctx: &Ctx, resource: &ResourceHandle) -> Result<(), Err>;

    fn compensation_description(&self, resource: &ResourceHandle) -> String;
}

pub(crate) struct StepWrapper<S> {
    step: S,
}

impl<S> StepWrapper<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

#[async_trait]
impl<S> ErasedStep<S::Context, S::Error> for StepWrapper<S>
where
    S: ScenarioStep,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    async fn execute_erased(
        &self,
        ctx: &S::Context,
        input: ErasedValue,
    ) -> Result<(ErasedValue, Vec<ResourceHandle>), S::Error> {
        let typed_input = input
            .downcast::<S::Input>()
            .expect("type-state builder guarantees correct input type");
        let (value, created) = self.step.execute(ctx, *typed_input).await?.into_parts();
        Ok((Box::new(value), created))
    }

    async fn compensate_erased(
        &self,
        ctx: &S::Context,
        resource: &ResourceHandle,
    ) -> Result<(), S::Error> {
        self.step.compensate(ctx, resource).await
    }

    fn compensation_description(&self, resource: &ResourceHandle) -> String {
        self.step.compensation_description(resource)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use scenario_core::ResourceKind;

    use super::*;
    use crate::step::StepOutput;

    struct TestContext {
        multiplier: i32,
        compensated: Mutex<Vec<String>>,
    }

    #[derive(Debug, PartialEq)]
    struct TestError(String);

    struct MultiplyStep;

    #[async_trait]
    impl ScenarioStep for MultiplyStep {
        type Input = i32;
        type Output = i32;
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &'static str {
            "multiply"
        }

        async fn execute(
            &self,
            ctx: &Self::Context,
            input: Self::Input,
        ) -> Result<StepOutput<Self::Output>, Self::Error> {
            let product = input * ctx.multiplier;
            Ok(StepOutput::new(product)
                .with_resource(ResourceHandle::new(ResourceKind::Object, product.to_string())))
        }

        async fn compensate(
            &self,
            ctx: &Self::Context,
            resource: &ResourceHandle,
        ) -> Result<(), Self::Error> {
            ctx.compensated
                .lock()
                .expect("lock poisoned")
                .push(resource.identifier.clone());
            Ok(())
        }
    }

    struct FailingStep;

    #[async_trait]
    impl ScenarioStep for FailingStep {
        type Input = String;
        type Output = ();
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &'static str {
            "failing"
        }

        async fn execute(
            &self,
            _ctx: &Self::Context,
            input: Self::Input,
        ) -> Result<StepOutput<Self::Output>, Self::Error> {
            Err(TestError(input))
        }
    }

    fn context() -> TestContext {
        TestContext {
            multiplier: 3,
            compensated: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn wrapper_delegates_name() {
        let wrapper = StepWrapper::new(MultiplyStep);
        assert_eq!(wrapper.name(), "multiply");
    }

    #[tokio::test]
    async fn wrapper_executes_with_erased_types() {
        let ctx = context();
        let wrapper = StepWrapper::new(MultiplyStep);

        let input: ErasedValue = Box::new(7_i32);
        let (output, created) = wrapper
            .execute_erased(&ctx, input)
            .await
            .expect("execution should succeed");

        let output = output.downcast::<i32>().expect("output should be i32");
        assert_eq!(*output, 21);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].identifier, "21");
    }

    #[tokio::test]
    async fn wrapper_compensates_reported_resource() {
        let ctx = context();
        let wrapper = StepWrapper::new(MultiplyStep);
        let resource = ResourceHandle::new(ResourceKind::Object, "21");

        let result = wrapper.compensate_erased(&ctx, &resource).await;

        assert!(result.is_ok());
        assert_eq!(*ctx.compensated.lock().expect("lock poisoned"), ["21"]);
    }

    #[test]
    fn wrapper_returns_compensation_description() {
        let wrapper = StepWrapper::new(MultiplyStep);
        let resource = ResourceHandle::new(ResourceKind::Object, "21");

        assert_eq!(
            wrapper.compensation_description(&resource),
            "undo multiply for object '21'"
        );
    }

    #[tokio::test]
    async fn wrapper_propagates_errors() {
        let ctx = context();
        let wrapper = StepWrapper::new(FailingStep);

        let input: ErasedValue = Box::new(String::from("test error"));
        let result = wrapper.execute_erased(&ctx, input).await;

        let err = result.err().expect("should have an error");
        assert_eq!(err, TestError(String::from("test error")));
    }
}
